use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<&'static str>,
}

impl HealthResponse {
    pub fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            storage: None,
        }
    }

    pub fn with_storage(mut self, storage: &'static str) -> Self {
        self.storage = Some(storage);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_omits_storage_by_default() {
        let json = serde_json::to_value(HealthResponse::new("alive")).unwrap();

        assert_eq!(json["status"], "alive");
        assert!(json.get("storage").is_none());
    }

    #[test]
    fn test_health_response_with_storage() {
        let json = serde_json::to_value(HealthResponse::new("ready").with_storage("ok")).unwrap();
        assert_eq!(json["storage"], "ok");
    }
}
