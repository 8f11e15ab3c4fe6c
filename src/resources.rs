//! MCP resources backed by Umami API endpoints.
//!
//! Each resource is a fixed URI that maps to one GET endpoint. The server
//! fetches the endpoint through the shared client when the resource is read.

/// A static resource exposed over MCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Resource URI (e.g., `umami://websites`).
    pub uri: &'static str,
    /// Short resource name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// API path fetched when the resource is read.
    pub api_path: &'static str,
}

/// MIME type of every resource body.
pub const RESOURCE_MIME_TYPE: &str = "application/json";

/// All resources, in listing order.
pub const RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        uri: "umami://websites",
        name: "websites",
        description: "List of all websites tracked in Umami",
        api_path: "/api/websites",
    },
    ResourceSpec {
        uri: "umami://me",
        name: "account",
        description: "Current authenticated Umami user info",
        api_path: "/api/me",
    },
];

/// Looks up a resource by URI.
pub fn find(uri: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|r| r.uri == uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_resources() {
        assert_eq!(find("umami://websites").map(|r| r.api_path), Some("/api/websites"));
        assert_eq!(find("umami://me").map(|r| r.api_path), Some("/api/me"));
    }

    #[test]
    fn test_find_unknown_resource() {
        assert!(find("umami://teams").is_none());
    }

    #[test]
    fn test_uris_are_unique() {
        for (i, a) in RESOURCES.iter().enumerate() {
            for b in &RESOURCES[i + 1..] {
                assert_ne!(a.uri, b.uri);
            }
        }
    }
}
