//! Multipart upload integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};

    use crate::{cleanup_bucket, create_test_bucket, s3_client};

    async fn upload_part(
        client: &aws_sdk_s3::Client,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Vec<u8>,
    ) -> String {
        let resp = client
            .upload_part()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(data))
            .send()
            .await
            .unwrap_or_else(|e| panic!("upload part {part_number}: {e}"));
        resp.e_tag().unwrap_or_default().to_owned()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_complete_multipart_upload() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "mpu").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("multipart.bin")
            .send()
            .await
            .expect("create_multipart_upload");
        let upload_id = create.upload_id().expect("upload_id");

        let etag1 = upload_part(
            &client,
            &bucket,
            "multipart.bin",
            upload_id,
            1,
            vec![0xAA; 1024],
        )
        .await;
        let etag2 = upload_part(
            &client,
            &bucket,
            "multipart.bin",
            upload_id,
            2,
            vec![0xBB; 1024],
        )
        .await;

        let completed = CompletedMultipartUpload::builder()
            .parts(CompletedPart::builder().part_number(1).e_tag(etag1).build())
            .parts(CompletedPart::builder().part_number(2).e_tag(etag2).build())
            .build();

        let complete = client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("multipart.bin")
            .upload_id(upload_id)
            .multipart_upload(completed)
            .send()
            .await
            .expect("complete_multipart_upload");

        // Multipart etags carry the part count suffix.
        assert!(
            complete.e_tag().is_some_and(|t| t.ends_with("-2\"")),
            "etag should end in part count: {:?}",
            complete.e_tag()
        );

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("multipart.bin")
            .send()
            .await
            .expect("get multipart object");

        let data = resp.body.collect().await.expect("collect").into_bytes();
        assert_eq!(data.len(), 2048);
        assert!(data[..1024].iter().all(|&b| b == 0xAA));
        assert!(data[1024..].iter().all(|&b| b == 0xBB));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_replace_reuploaded_part() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "reupload").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("replaced.bin")
            .send()
            .await
            .expect("create");
        let upload_id = create.upload_id().expect("upload_id");

        upload_part(&client, &bucket, "replaced.bin", upload_id, 1, vec![0x00; 512]).await;
        // Re-uploading the same part number replaces the first payload.
        let etag = upload_part(&client, &bucket, "replaced.bin", upload_id, 1, vec![0xFF; 256])
            .await;

        let completed = CompletedMultipartUpload::builder()
            .parts(CompletedPart::builder().part_number(1).e_tag(etag).build())
            .build();

        client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("replaced.bin")
            .upload_id(upload_id)
            .multipart_upload(completed)
            .send()
            .await
            .expect("complete");

        let resp = client
            .get_object()
            .bucket(&bucket)
            .key("replaced.bin")
            .send()
            .await
            .expect("get");
        let data = resp.body.collect().await.expect("collect").into_bytes();
        assert_eq!(data.len(), 256);
        assert!(data.iter().all(|&b| b == 0xFF));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_part_and_keep_upload() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "badpart").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("partial.bin")
            .send()
            .await
            .expect("create");
        let upload_id = create.upload_id().expect("upload_id");

        let etag1 =
            upload_part(&client, &bucket, "partial.bin", upload_id, 1, vec![0x11; 512]).await;

        // Reference a part that was never uploaded.
        let bad_manifest = CompletedMultipartUpload::builder()
            .parts(CompletedPart::builder().part_number(1).e_tag(&etag1).build())
            .parts(
                CompletedPart::builder()
                    .part_number(2)
                    .e_tag("\"deadbeef\"")
                    .build(),
            )
            .build();

        let result = client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("partial.bin")
            .upload_id(upload_id)
            .multipart_upload(bad_manifest)
            .send()
            .await;
        assert!(result.is_err(), "unknown part should fail completion");

        // The upload survives and a corrected manifest succeeds.
        let good_manifest = CompletedMultipartUpload::builder()
            .parts(CompletedPart::builder().part_number(1).e_tag(&etag1).build())
            .build();

        client
            .complete_multipart_upload()
            .bucket(&bucket)
            .key("partial.bin")
            .upload_id(upload_id)
            .multipart_upload(good_manifest)
            .send()
            .await
            .expect("retry after failed completion");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_abort_multipart_upload_idempotently() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "abort").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("aborted.bin")
            .send()
            .await
            .expect("create");
        let upload_id = create.upload_id().expect("upload_id");

        upload_part(&client, &bucket, "aborted.bin", upload_id, 1, vec![0x42; 128]).await;

        client
            .abort_multipart_upload()
            .bucket(&bucket)
            .key("aborted.bin")
            .upload_id(upload_id)
            .send()
            .await
            .expect("first abort");

        // Aborting again is a no-op, not an error.
        client
            .abort_multipart_upload()
            .bucket(&bucket)
            .key("aborted.bin")
            .upload_id(upload_id)
            .send()
            .await
            .expect("second abort");

        let result = client
            .get_object()
            .bucket(&bucket)
            .key("aborted.bin")
            .send()
            .await;
        assert!(result.is_err(), "aborted upload key should not exist");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_parts_in_ascending_order() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "listparts").await;

        let create = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("parts.bin")
            .send()
            .await
            .expect("create");
        let upload_id = create.upload_id().expect("upload_id");

        // Upload out of order.
        for i in [3_i32, 1, 2] {
            let fill_byte = u8::try_from(i).expect("part number fits in u8");
            upload_part(&client, &bucket, "parts.bin", upload_id, i, vec![fill_byte; 512]).await;
        }

        let resp = client
            .list_parts()
            .bucket(&bucket)
            .key("parts.bin")
            .upload_id(upload_id)
            .send()
            .await
            .expect("list_parts");

        let numbers: Vec<_> = resp.parts().iter().filter_map(|p| p.part_number()).collect();
        assert_eq!(numbers, [1, 2, 3]);

        client
            .abort_multipart_upload()
            .bucket(&bucket)
            .key("parts.bin")
            .upload_id(upload_id)
            .send()
            .await
            .ok();
        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_multipart_uploads() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "listmpu").await;

        let c1 = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("file1.bin")
            .send()
            .await
            .expect("create 1");
        let c2 = client
            .create_multipart_upload()
            .bucket(&bucket)
            .key("file2.bin")
            .send()
            .await
            .expect("create 2");

        let resp = client
            .list_multipart_uploads()
            .bucket(&bucket)
            .send()
            .await
            .expect("list_multipart_uploads");

        let keys: Vec<_> = resp.uploads().iter().filter_map(|u| u.key()).collect();
        assert_eq!(keys, ["file1.bin", "file2.bin"]);

        for (key, create) in [("file1.bin", &c1), ("file2.bin", &c2)] {
            client
                .abort_multipart_upload()
                .bucket(&bucket)
                .key(key)
                .upload_id(create.upload_id().unwrap_or_default())
                .send()
                .await
                .ok();
        }
        cleanup_bucket(&client, &bucket).await;
    }
}
