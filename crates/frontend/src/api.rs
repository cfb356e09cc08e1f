use starmap_shared::models::{DeleteResponse, Marker, MarkerId, MarkerRef, MarkerUpdate, NewMarker};

const POINTS_PATH: &str = "/api/points";

/// Build the marker resource URL from the page origin.
pub fn build_points_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), POINTS_PATH)
}

fn api_url() -> String {
    // Same origin as the page; fall back to a relative path outside a window
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    match origin {
        Some(origin) => build_points_url(&origin),
        None => POINTS_PATH.to_string(),
    }
}

/// Turn a non-2xx response into its `{"error": ...}` message when present.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, String> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(error_message(status.as_u16(), &body))
}

pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<starmap_shared::models::ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

pub async fn fetch_markers() -> Result<Vec<Marker>, String> {
    let resp = reqwest::Client::new()
        .get(api_url())
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(resp)
        .await?
        .json()
        .await
        .map_err(|e| e.to_string())
}

pub async fn create_marker(new: &NewMarker) -> Result<Marker, String> {
    let resp = reqwest::Client::new()
        .post(api_url())
        .json(new)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(resp)
        .await?
        .json()
        .await
        .map_err(|e| e.to_string())
}

pub async fn update_marker(update: &MarkerUpdate) -> Result<Marker, String> {
    let resp = reqwest::Client::new()
        .put(api_url())
        .json(update)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    check_status(resp)
        .await?
        .json()
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete_marker(id: MarkerId) -> Result<bool, String> {
    let resp = reqwest::Client::new()
        .delete(api_url())
        .json(&MarkerRef { id })
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body: DeleteResponse = check_status(resp)
        .await?
        .json()
        .await
        .map_err(|e| e.to_string())?;
    Ok(body.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_points_url() {
        assert_eq!(
            build_points_url("http://localhost:3000"),
            "http://localhost:3000/api/points"
        );
        assert_eq!(
            build_points_url("https://stars.example.com/"),
            "https://stars.example.com/api/points"
        );
    }

    #[test]
    fn test_marker_list_deserializes() {
        let json = r#"[{"id":1,"x":10,"y":5,"name":"Vega","details":"Lyra"},{"id":2,"x":0,"y":0,"name":null}]"#;
        let markers: Vec<Marker> = serde_json::from_str(json).unwrap();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name.as_deref(), Some("Vega"));
        assert_eq!(markers[1].name, None);
        assert_eq!(markers[1].details, None);
    }

    #[test]
    fn test_new_marker_serializes_position() {
        let body = NewMarker {
            x: 12,
            y: 7,
            name: None,
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["x"], 12);
        assert_eq!(json["y"], 7);
    }

    #[test]
    fn test_update_serializes_id_and_text() {
        let body = MarkerUpdate {
            id: 4,
            name: Some("Rigel".to_string()),
            details: Some(String::new()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Rigel");
        assert_eq!(json["details"], "");
        assert!(json.get("x").is_none());
    }

    #[test]
    fn test_delete_body_and_response() {
        let json = serde_json::to_value(MarkerRef { id: 9 }).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 9 }));
        let resp: DeleteResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(404, r#"{"error":"Point not found"}"#),
            "Point not found"
        );
        assert_eq!(error_message(502, "<html>bad gateway</html>"), "HTTP 502");
    }
}
