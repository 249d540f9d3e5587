//! List objects integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{cleanup_bucket, create_test_bucket, s3_client};

    async fn populate_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
        let keys = [
            "photos/2024/jan/img1.jpg",
            "photos/2024/jan/img2.jpg",
            "photos/2024/feb/img3.jpg",
            "photos/2025/mar/img4.jpg",
            "documents/report.pdf",
            "documents/readme.txt",
            "root.txt",
        ];
        for key in keys {
            client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(ByteStream::from_static(b"x"))
                .send()
                .await
                .unwrap_or_else(|e| panic!("put {key}: {e}"));
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_objects_v2_in_order() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "listv2").await;
        populate_bucket(&client, &bucket).await;

        let resp = client
            .list_objects_v2()
            .bucket(&bucket)
            .send()
            .await
            .expect("list_objects_v2");

        assert_eq!(resp.key_count(), Some(7));
        let keys: Vec<_> = resp.contents().iter().filter_map(|o| o.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted, "keys should be in lexicographic order");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_with_prefix() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "prefix").await;
        populate_bucket(&client, &bucket).await;

        let resp = client
            .list_objects_v2()
            .bucket(&bucket)
            .prefix("photos/2024/")
            .send()
            .await
            .expect("list with prefix");

        assert_eq!(resp.key_count(), Some(3));
        assert!(
            resp.contents()
                .iter()
                .filter_map(|o| o.key())
                .all(|k| k.starts_with("photos/2024/")),
            "every key should carry the prefix"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_with_delimiter() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "delim").await;
        populate_bucket(&client, &bucket).await;

        let resp = client
            .list_objects_v2()
            .bucket(&bucket)
            .delimiter("/")
            .send()
            .await
            .expect("list with delimiter");

        let prefixes: Vec<_> = resp
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix())
            .collect();
        assert_eq!(prefixes, ["documents/", "photos/"]);

        let keys: Vec<_> = resp.contents().iter().filter_map(|o| o.key()).collect();
        assert_eq!(keys, ["root.txt"]);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_paginate_with_continuation_tokens() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "page").await;
        populate_bucket(&client, &bucket).await;

        let mut collected = Vec::new();
        let mut token = None;
        loop {
            let mut req = client.list_objects_v2().bucket(&bucket).max_keys(3);
            if let Some(t) = token.take() {
                req = req.continuation_token(t);
            }
            let resp = req.send().await.expect("paged list");
            collected.extend(
                resp.contents()
                    .iter()
                    .filter_map(|o| o.key())
                    .map(ToOwned::to_owned),
            );
            if resp.is_truncated() == Some(true) {
                token = resp.next_continuation_token().map(ToOwned::to_owned);
            } else {
                break;
            }
        }

        // Every key exactly once, in order, across all pages.
        assert_eq!(collected.len(), 7);
        let mut sorted = collected.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(collected, sorted, "pages should not skip or repeat keys");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_after_start_after() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "startafter").await;
        populate_bucket(&client, &bucket).await;

        let resp = client
            .list_objects_v2()
            .bucket(&bucket)
            .start_after("photos/2024/jan/img2.jpg")
            .send()
            .await
            .expect("list with start-after");

        let keys: Vec<_> = resp.contents().iter().filter_map(|o| o.key()).collect();
        assert_eq!(keys, ["photos/2025/mar/img4.jpg", "root.txt"]);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_empty_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "emptylist").await;

        let resp = client
            .list_objects_v2()
            .bucket(&bucket)
            .send()
            .await
            .expect("list empty bucket");

        assert_eq!(resp.key_count(), Some(0));
        assert!(resp.contents().is_empty());
        assert_eq!(resp.is_truncated(), Some(false));

        cleanup_bucket(&client, &bucket).await;
    }
}
