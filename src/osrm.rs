//! OSRM HTTP adapter for point-to-point routes.

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::model::Coordinate;
use crate::traits::{RouteProvider, RouteSummary};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, coordinates: &[Coordinate]) -> String {
        let coords = coordinates
            .iter()
            .map(|c| format!("{:.6},{:.6}", c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> Result<RouteSummary, ProviderError> {
        let mut coordinates = Vec::with_capacity(waypoints.len() + 2);
        coordinates.push(origin);
        coordinates.extend_from_slice(waypoints);
        coordinates.push(destination);

        let url = self.route_url(&coordinates);
        debug!(%url, "requesting OSRM route");

        // OSRM reports failures such as NoRoute with a 400 and a JSON body,
        // so the body is decoded before looking at the status.
        let response = self.client.get(url).send()?;
        let status = response.status();
        let parsed = match response.json::<OsrmRouteResponse>() {
            Ok(parsed) => parsed,
            Err(err) if !status.is_success() => {
                return Err(ProviderError::Rejected {
                    code: status.as_u16().to_string(),
                    message: err.to_string(),
                });
            }
            Err(err) => return Err(ProviderError::Malformed(err.to_string())),
        };

        if parsed.code != "Ok" {
            return Err(ProviderError::Rejected {
                code: parsed.code,
                message: parsed.message.unwrap_or_default(),
            });
        }

        let route = parsed
            .routes
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ProviderError::NoRoutes)?;

        Ok(RouteSummary {
            polyline: route.geometry,
            duration_s: route.duration,
            distance_m: route.distance,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_orders_lng_lat() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://osrm.local/".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        let url = client.route_url(&[
            Coordinate::new(41.3874, 2.1686),
            Coordinate::new(41.9794, 2.8214),
        ]);
        assert_eq!(
            url,
            "http://osrm.local/route/v1/car/2.168600,41.387400;2.821400,41.979400?overview=full&geometries=polyline"
        );
    }
}
