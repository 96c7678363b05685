//! Declarative upload buckets.
//!
//! A bucket is a named destination on the hosted storage service. The service
//! enforces its own rules; the app only needs each bucket's client-visible
//! constraints so the widget uploading into it can refuse files early.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{BatchConfig, ONE_MB};

/// What a bucket stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    /// Images only; the service also produces thumbnails
    Image,
    /// Any file
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub kind: BucketKind,
    pub max_size: Option<u64>,
    /// Allowed values for the path input sent with each upload
    #[serde(default)]
    pub path_input: Vec<String>,
}

impl Bucket {
    /// Constraints a dropzone targeting this bucket should enforce.
    pub fn batch_config(&self, max_files: Option<usize>) -> BatchConfig {
        BatchConfig {
            max_files,
            max_size: self.max_size,
            accepted_types: match self.kind {
                BucketKind::Image => Some(vec!["image/*".to_string()]),
                BucketKind::File => None,
            },
        }
    }

    /// Whether `input` is a valid path input for this bucket.
    ///
    /// Buckets without declared inputs accept none.
    pub fn accepts_input(&self, input: Option<&str>) -> bool {
        match input {
            None => self.path_input.is_empty(),
            Some(value) => self.path_input.iter().any(|allowed| allowed == value),
        }
    }
}

/// Named collection of buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRouter {
    buckets: BTreeMap<String, Bucket>,
}

impl BucketRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_bucket(self, name: impl Into<String>, max_size: Option<u64>) -> Self {
        self.with_bucket(Bucket {
            name: name.into(),
            kind: BucketKind::Image,
            max_size,
            path_input: Vec::new(),
        })
    }

    pub fn file_bucket(self, name: impl Into<String>, max_size: Option<u64>) -> Self {
        self.with_bucket(Bucket {
            name: name.into(),
            kind: BucketKind::File,
            max_size,
            path_input: Vec::new(),
        })
    }

    /// Adds or replaces a bucket.
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.buckets.insert(bucket.name.clone(), bucket);
        self
    }

    /// Restricts the path input of an existing bucket. Unknown names are ignored.
    pub fn with_path_input<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(bucket) = self.buckets.get_mut(name) {
            bucket.path_input = values.into_iter().map(Into::into).collect();
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.get(name)
    }

    /// Bucket names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The buckets used by the demo app: public images up to 1 MB tagged as
    /// `post` or `profile`, and unrestricted protected files.
    pub fn demo() -> Self {
        Self::new()
            .image_bucket("publicImages", Some(ONE_MB))
            .with_path_input("publicImages", ["post", "profile"])
            .file_bucket("protectedFiles", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_router() {
        let router = BucketRouter::demo();
        assert_eq!(router.len(), 2);
        assert_eq!(
            router.names().collect::<Vec<_>>(),
            vec!["protectedFiles", "publicImages"]
        );

        let images = router.get("publicImages").unwrap();
        assert_eq!(images.kind, BucketKind::Image);
        assert_eq!(images.max_size, Some(1_048_576));
        assert!(images.accepts_input(Some("post")));
        assert!(!images.accepts_input(Some("banner")));
        assert!(!images.accepts_input(None));

        let files = router.get("protectedFiles").unwrap();
        assert!(files.accepts_input(None));
    }

    #[test]
    fn test_batch_config_from_bucket() {
        let router = BucketRouter::demo();

        let images = router.get("publicImages").unwrap().batch_config(Some(1));
        assert_eq!(images.max_files, Some(1));
        assert_eq!(images.max_size, Some(ONE_MB));
        assert_eq!(images.accepted_types, Some(vec!["image/*".to_string()]));

        let files = router.get("protectedFiles").unwrap().batch_config(None);
        assert_eq!(files, BatchConfig::default());
    }

    #[test]
    fn test_with_bucket_replaces() {
        let router = BucketRouter::new()
            .file_bucket("docs", None)
            .file_bucket("docs", Some(10));
        assert_eq!(router.len(), 1);
        assert_eq!(router.get("docs").unwrap().max_size, Some(10));
    }

    #[test]
    fn test_deserialize_bucket() {
        let bucket: Bucket = serde_json::from_str(
            r#"{ "name": "avatars", "kind": "image", "max_size": 2048 }"#,
        )
        .unwrap();
        assert_eq!(bucket.kind, BucketKind::Image);
        assert!(bucket.path_input.is_empty());
    }
}
