//! Object CRUD integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{cleanup_bucket, create_test_bucket, s3_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_and_get_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "putget").await;

        let body = b"hello, harbor!";
        client
            .put_object()
            .bucket(&bucket)
            .key("greeting.txt")
            .body(ByteStream::from_static(body))
            .content_type("text/plain")
            .send()
            .await
            .expect("put_object");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("greeting.txt")
            .send()
            .await
            .expect("get_object");

        assert_eq!(
            resp.content_type(),
            Some("text/plain"),
            "content_type should match"
        );
        assert_eq!(resp.content_length(), Some(14));

        let data = resp
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.as_ref(), body);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_round_trip_large_payload() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "large").await;

        // 8 MiB with a position-dependent pattern so any corruption shows up.
        let payload: Vec<u8> = (0..8 * 1024 * 1024)
            .map(|i: usize| u8::try_from((i * 31 + i / 251) % 256).unwrap_or(0))
            .collect();

        let put = client
            .put_object()
            .bucket(&bucket)
            .key("blob.bin")
            .body(ByteStream::from(payload.clone()))
            .send()
            .await
            .expect("put large object");
        assert!(put.e_tag().is_some(), "etag should be present");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("blob.bin")
            .send()
            .await
            .expect("get large object");

        let data = resp
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data.len(), payload.len());
        assert_eq!(data.as_ref(), payload.as_slice(), "payload should be byte-exact");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_overwrite_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "overwrite").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("file.txt")
            .body(ByteStream::from_static(b"first version"))
            .send()
            .await
            .expect("first put");

        client
            .put_object()
            .bucket(&bucket)
            .key("file.txt")
            .body(ByteStream::from_static(b"second"))
            .send()
            .await
            .expect("second put");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("file.txt")
            .send()
            .await
            .expect("get_object");

        let data = resp.body.collect().await.expect("collect").into_bytes();
        assert_eq!(data.as_ref(), b"second");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_head_object_with_metadata() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "head").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("file.bin")
            .body(ByteStream::from_static(b"binary data"))
            .content_type("application/octet-stream")
            .metadata("owner-team", "storage")
            .send()
            .await
            .expect("put_object");

        let resp = client
            .head_object()
            .bucket(&bucket)
            .key("file.bin")
            .send()
            .await
            .expect("head_object");

        assert_eq!(resp.content_length(), Some(11));
        assert_eq!(resp.content_type(), Some("application/octet-stream"));
        assert!(resp.e_tag().is_some(), "etag should be present");
        assert_eq!(
            resp.metadata().and_then(|m| m.get("owner-team")),
            Some(&"storage".to_owned())
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_get_object_range() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "range").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("ranged.txt")
            .body(ByteStream::from_static(b"hello world"))
            .send()
            .await
            .expect("put_object");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("ranged.txt")
            .range("bytes=6-10")
            .send()
            .await
            .expect("ranged get");

        assert_eq!(resp.content_range(), Some("bytes 6-10/11"));
        let data = resp.body.collect().await.expect("collect").into_bytes();
        assert_eq!(data.as_ref(), b"world");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_object_idempotently() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "del").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("delete-me.txt")
            .body(ByteStream::from_static(b"temp"))
            .send()
            .await
            .expect("put_object");

        client
            .delete_object()
            .bucket(&bucket)
            .key("delete-me.txt")
            .send()
            .await
            .expect("first delete");

        // A second delete of the same key still succeeds.
        client
            .delete_object()
            .bucket(&bucket)
            .key("delete-me.txt")
            .send()
            .await
            .expect("second delete");

        let result = client
            .get_object()
            .bucket(&bucket)
            .key("delete-me.txt")
            .send()
            .await;
        assert!(result.is_err(), "get after delete should fail");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_put_empty_object() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "empty").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("empty.txt")
            .body(ByteStream::from_static(b""))
            .send()
            .await
            .expect("put empty object");

        let resp = client
            .head_object()
            .bucket(&bucket)
            .key("empty.txt")
            .send()
            .await
            .expect("head_object");
        assert_eq!(resp.content_length(), Some(0));

        cleanup_bucket(&client, &bucket).await;
    }
}
