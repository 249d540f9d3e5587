//! Health endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::endpoint_url;

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_running_on_health_endpoint() {
        let url = format!("{}/_health", endpoint_url());
        let resp = reqwest::get(&url).await.expect("health request");
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.expect("health body");
        assert_eq!(body["status"], "running");
        assert_eq!(body["service"], "s3");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_xml_error_with_request_id() {
        let url = format!("{}/no-such-bucket-anywhere/key.txt", endpoint_url());
        let resp = reqwest::get(&url).await.expect("request");
        assert_eq!(resp.status(), 404);
        assert!(
            resp.headers().contains_key("x-amz-request-id"),
            "request id header should be present"
        );

        let body = resp.text().await.expect("body");
        assert!(body.contains("<Error>"), "body should be an XML error");
        assert!(body.contains("<Code>NoSuchBucket</Code>"), "body: {body}");
    }
}
