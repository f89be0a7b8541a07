//! Resolves fully-qualified ROS2 type names into registered runtime schemas.
//!
//! Dynamic endpoints don't know their message shape at compile time, so
//! they can't reach for a generated `TypeSupport` impl the way the static
//! `Publisher<T>`/`Subscriber<T>` do. This module is what they reach for
//! instead: it ties the on-disk/git-fetched `.msg`/`.srv` source
//! ([`ros2msg::repo::SchemaRepo`]), the text parser ([`ros2msg::msg`]), the
//! AST-to-schema bridge ([`ros2msg::schema`]), and the shared
//! [`ros2_types::TypeStore`] into one `resolve` call — parsing and caching
//! a definition (and everything it transitively references) on first use.

use crate::error::{Error, Result};
use ros2_types::types::IndividualTypeDescription;
use ros2_types::{MessageSchema, TypeStore, calculate_type_hash};
use ros2msg::msg::{parse_message_file, parse_service_file};
use ros2msg::repo::{MessageRepository, SchemaRepo};
use ros2msg::schema::to_type_description;
use std::sync::Arc;

/// Looks up `.msg`/`.srv` definitions on demand and materializes them into
/// the shared [`TypeStore`].
pub struct TypeRegistry {
    store: Arc<TypeStore>,
    repo: SchemaRepo,
}

impl TypeRegistry {
    /// A registry backed by [`TypeStore::with_builtins`] and the default
    /// [`SchemaRepo`] (system `git`, built-in package map).
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(TypeStore::with_builtins()),
            repo: SchemaRepo::new(),
        }
    }

    /// The type store backing this registry, shared by every endpoint that
    /// resolves through it.
    #[must_use]
    pub fn store(&self) -> &Arc<TypeStore> {
        &self.store
    }

    /// Register (or override) the repository a package's definitions are
    /// fetched from.
    pub fn register_package(&mut self, package: impl Into<String>, repository: MessageRepository) {
        self.repo.register_package(package, repository);
    }

    /// Resolve a `<pkg>/msg/<Name>` type, parsing and caching its file (and
    /// every type it references, transitively) on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] if the definition can't be located
    /// locally or fetched, or [`Error::SchemaParseError`] if it fails to
    /// parse.
    pub fn resolve(&self, fq_type_name: &str) -> Result<Arc<MessageSchema>> {
        if let Some(schema) = self.store.get(fq_type_name) {
            return Ok(schema);
        }

        let pkg = fq_type_name
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::SchemaNotFound(fq_type_name.to_string()))?;

        let path = self
            .repo
            .interface_file_path(fq_type_name)
            .ok_or_else(|| Error::SchemaNotFound(fq_type_name.to_string()))?;

        let spec = parse_message_file(pkg, &path)
            .map_err(|e| Error::SchemaParseError(format!("{fq_type_name}: {e}")))?;

        let description = to_type_description(&spec);
        self.resolve_referenced(&description)?;

        Ok(self.store.register(description)?)
    }

    /// Resolve a `<pkg>/srv/<Name>` service, returning its request and
    /// response schemas. Both halves are registered under
    /// `<pkg>/srv/<Name>_Request` and `<pkg>/srv/<Name>_Response`, matching
    /// the naming the key-expression layer expects when it strips the
    /// `_Request_`/`_Response_` suffix to find the shared service key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotFound`] if the definition can't be located
    /// locally or fetched, or [`Error::SchemaParseError`] if it fails to
    /// parse.
    pub fn resolve_service(
        &self,
        fq_service_name: &str,
    ) -> Result<(Arc<MessageSchema>, Arc<MessageSchema>)> {
        let request_name = format!("{fq_service_name}_Request");
        let response_name = format!("{fq_service_name}_Response");
        if let (Some(request), Some(response)) =
            (self.store.get(&request_name), self.store.get(&response_name))
        {
            return Ok((request, response));
        }

        let mut parts = fq_service_name.splitn(3, '/');
        let (pkg, kind, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(pkg), Some(kind), Some(name)) if kind == "srv" => (pkg, kind, name),
            _ => return Err(Error::SchemaNotFound(fq_service_name.to_string())),
        };

        let path = self
            .repo
            .interface_file_path(fq_service_name)
            .ok_or_else(|| Error::SchemaNotFound(fq_service_name.to_string()))?;

        let spec = parse_service_file(pkg, &path)
            .map_err(|e| Error::SchemaParseError(format!("{fq_service_name}: {e}")))?;

        let mut request = to_type_description(&spec.request);
        request.type_name = format!("{pkg}/{kind}/{name}_Request");
        self.resolve_referenced(&request)?;

        let mut response = to_type_description(&spec.response);
        response.type_name = format!("{pkg}/{kind}/{name}_Response");
        self.resolve_referenced(&response)?;

        let request = self.store.register(request)?;
        let response = self.store.register(response)?;
        Ok((request, response))
    }

    /// The RIHS01 hash of a resolved (or resolvable) type.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::resolve`]'s errors, plus any error building the
    /// transitive type-description needed to compute the hash.
    pub fn type_hash(&self, fq_type_name: &str) -> Result<String> {
        self.resolve(fq_type_name)?;
        let description = self.store.type_description(fq_type_name)?;
        Ok(calculate_type_hash(&description)?)
    }

    /// Recursively resolve every nested type a description references,
    /// before the description itself is registered.
    fn resolve_referenced(&self, description: &IndividualTypeDescription) -> Result<()> {
        for field in &description.fields {
            let nested = &field.field_type.nested_type_name;
            if !nested.is_empty() && self.store.get(nested).is_none() {
                self.resolve(nested)?;
            }
        }
        Ok(())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros2msg::repo::GitFetcher;
    use std::path::Path;

    #[derive(Default)]
    struct FakeFetcher {
        files: Vec<(&'static str, &'static str)>,
    }

    impl GitFetcher for FakeFetcher {
        fn sync(&self, _url: &str, target_dir: &Path, _commit: Option<&str>) -> std::io::Result<()> {
            for (relative, content) in &self.files {
                let path = target_dir.join(relative);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, content)?;
            }
            Ok(())
        }
    }

    fn registry_with(cache_env: &str, files: Vec<(&'static str, &'static str)>) -> TypeRegistry {
        unsafe {
            std::env::set_var(ros2msg::repo::CACHE_DIR_ENV_VAR, cache_env);
        }
        let repo = SchemaRepo::with_fetcher(Box::new(FakeFetcher { files }));
        TypeRegistry {
            store: Arc::new(TypeStore::with_builtins()),
            repo,
        }
    }

    fn tmp_dir(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("ros2z-type-registry-{name}-{}", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn resolves_and_caches_a_simple_message() {
        let cache = tmp_dir("simple");
        let registry = registry_with(
            &cache,
            vec![("std_msgs/msg/String.msg", "string data\n")],
        );

        let schema = registry.resolve("std_msgs/msg/String").unwrap();
        assert_eq!(schema.type_name, "std_msgs/msg/String");

        // Cached the second time: the fetcher only wrote one definition, so
        // a second fetch attempt (without caching) would hit the same file
        // again harmlessly, but resolve() should short-circuit via the
        // store instead of re-parsing.
        let again = registry.resolve("std_msgs/msg/String").unwrap();
        assert!(Arc::ptr_eq(&schema, &again));

        let _ = std::fs::remove_dir_all(cache);
        unsafe {
            std::env::remove_var(ros2msg::repo::CACHE_DIR_ENV_VAR);
        }
    }

    #[test]
    fn resolves_nested_references_transitively() {
        let cache = tmp_dir("nested");
        let registry = registry_with(
            &cache,
            vec![
                (
                    "geometry_msgs/msg/Twist.msg",
                    "Vector3 linear\nVector3 angular\n",
                ),
                (
                    "geometry_msgs/msg/Vector3.msg",
                    "float64 x\nfloat64 y\nfloat64 z\n",
                ),
            ],
        );

        let twist = registry.resolve("geometry_msgs/msg/Twist").unwrap();
        assert_eq!(twist.fields.len(), 2);
        assert!(registry.store().get("geometry_msgs/msg/Vector3").is_some());

        let _ = std::fs::remove_dir_all(cache);
        unsafe {
            std::env::remove_var(ros2msg::repo::CACHE_DIR_ENV_VAR);
        }
    }

    #[test]
    fn resolve_service_registers_request_and_response() {
        let cache = tmp_dir("service");
        let registry = registry_with(
            &cache,
            vec![(
                "example_interfaces/srv/AddTwoInts.srv",
                "int64 a\nint64 b\n---\nint64 sum\n",
            )],
        );

        let (request, response) = registry
            .resolve_service("example_interfaces/srv/AddTwoInts")
            .unwrap();
        assert_eq!(
            request.type_name,
            "example_interfaces/srv/AddTwoInts_Request"
        );
        assert_eq!(
            response.type_name,
            "example_interfaces/srv/AddTwoInts_Response"
        );
        assert_eq!(request.fields.len(), 2);
        assert_eq!(response.fields.len(), 1);

        let _ = std::fs::remove_dir_all(cache);
        unsafe {
            std::env::remove_var(ros2msg::repo::CACHE_DIR_ENV_VAR);
        }
    }

    #[test]
    fn type_hash_matches_known_rihs01_vectors() {
        let cache = tmp_dir("hash-vectors");
        let registry = registry_with(
            &cache,
            vec![
                ("std_msgs/msg/String.msg", "string data\n"),
                (
                    "geometry_msgs/msg/Twist.msg",
                    "Vector3 linear\nVector3 angular\n",
                ),
                (
                    "geometry_msgs/msg/Vector3.msg",
                    "float64 x\nfloat64 y\nfloat64 z\n",
                ),
            ],
        );

        assert_eq!(
            registry.type_hash("std_msgs/msg/String").unwrap(),
            "RIHS01_df668c740482bbd48fb39d76a70dfd4bd59db1288021743503259e948f6b1a18"
        );
        assert_eq!(
            registry.type_hash("geometry_msgs/msg/Twist").unwrap(),
            "RIHS01_9c45bf16fe0983d80e3cfe750d6835843d265a9a6c46bd2e609fcddde6fb8d2a"
        );

        let _ = std::fs::remove_dir_all(cache);
        unsafe {
            std::env::remove_var(ros2msg::repo::CACHE_DIR_ENV_VAR);
        }
    }

    #[test]
    fn unknown_type_is_schema_not_found() {
        let registry = TypeRegistry {
            store: Arc::new(TypeStore::with_builtins()),
            repo: SchemaRepo::with_fetcher(Box::new(FakeFetcher::default())),
        };
        let err = registry.resolve("nope_msgs/msg/Nope").unwrap_err();
        assert!(matches!(err, Error::SchemaNotFound(_)));
    }
}
