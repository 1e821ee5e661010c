//! Wire shapes of the v2 JSON responses this client reads

use serde::Deserialize;

pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";
pub const DIGEST_HEADER: &str = "Docker-Content-Digest";

/// Content-addressed identifier of a manifest as reported by the registry
pub type ManifestDigest = String;

/// Image name to its tags, keyed in catalog order
pub type TagSet = Vec<(String, Vec<String>)>;

/// `GET /v2/_catalog`
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub repositories: Option<Vec<String>>,
}

/// `GET /v2/{name}/tags/list`
#[derive(Debug, Deserialize)]
pub struct TagListResponse {
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Lookup helper over a [`TagSet`]
pub fn tags_for<'a>(tag_set: &'a TagSet, image: &str) -> Option<&'a [String]> {
    tag_set
        .iter()
        .find(|(name, _)| name == image)
        .map(|(_, tags)| tags.as_slice())
}
