//! Custom resource definition manifests.
//!
//! [`synthesize`] turns a [`ResourceIdentity`] into the manifest that
//! registers the type with the server's meta-API. The synthesizer performs
//! no I/O; the manifest is created through the ordinary operation layer
//! against the meta-API's own definition resource (see
//! [`CustomResourceDefinition::identity`]).
use crate::{
    identity::{ResourceIdentity, Scope},
    metadata::{ObjectMeta, TypeMeta},
    object::ResourceObject,
};
use serde::{Deserialize, Serialize};

const DEFINITION_GROUP: &str = "apiextensions.k8s.io";
const DEFINITION_VERSION: &str = "v1beta1";

/// The registration manifest for a custom resource type.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CustomResourceDefinition {
    /// The type fields of the manifest itself.
    #[serde(flatten)]
    pub types: TypeMeta,

    /// Manifest metadata; the name is `{plural}.{group}` by convention.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// The definition payload.
    pub spec: DefinitionSpec,
}

impl CustomResourceDefinition {
    /// The meta-API identity under which definition manifests are stored.
    pub fn identity() -> ResourceIdentity {
        ResourceIdentity::new(
            DEFINITION_GROUP,
            DEFINITION_VERSION,
            "CustomResourceDefinition",
            "customresourcedefinitions",
        )
        .short_names(&["crd"])
        .cluster_scoped()
    }
}

impl ResourceObject for CustomResourceDefinition {
    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Body of a definition manifest.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DefinitionSpec {
    /// API group the defined type is served under.
    pub group: String,

    /// Served versions of the defined type.
    pub versions: Vec<DefinitionVersion>,

    /// Path and display names of the defined type.
    pub names: DefinitionNames,

    /// Scope of the defined type.
    pub scope: Scope,

    /// Subresource wiring, when any facet is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresources: Option<DefinitionSubresources>,
}

/// One served version of a defined type.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DefinitionVersion {
    /// Version name, e.g. `v1alpha1`.
    pub name: String,
    /// Whether this version is served.
    pub served: bool,
    /// Whether this version is the storage version.
    pub storage: bool,
}

/// Naming block of a definition manifest.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionNames {
    /// Plural path segment.
    pub plural: String,
    /// Singular name.
    pub singular: String,
    /// PascalCase kind.
    pub kind: String,
    /// Short name aliases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short_names: Vec<String>,
}

/// Subresource block of a definition manifest.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct DefinitionSubresources {
    /// Present when the status facet is enabled; carries no fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSubresource>,

    /// Present when the scale facet is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleSubresource>,
}

/// Marker object enabling the status facet.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSubresource {}

/// Replica path wiring enabling the scale facet.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSubresource {
    /// Path to the desired replica count inside `spec`.
    pub spec_replicas_path: String,
    /// Path to the observed replica count inside `status`.
    pub status_replicas_path: String,
}

/// Produce the registration manifest for an identity.
///
/// Pure function of the identity: group, version, names, scope and the
/// subresource wiring are mirrored; the single declared version is marked
/// served and storage.
pub fn synthesize(identity: &ResourceIdentity) -> CustomResourceDefinition {
    let subresources = identity.subresources.as_ref().map(|caps| DefinitionSubresources {
        status: caps.status.then(StatusSubresource::default),
        scale: caps.scale.as_ref().map(|paths| ScaleSubresource {
            spec_replicas_path: paths.spec_replicas_path.clone(),
            status_replicas_path: paths.status_replicas_path.clone(),
        }),
    });
    CustomResourceDefinition {
        types: TypeMeta {
            api_version: format!("{DEFINITION_GROUP}/{DEFINITION_VERSION}"),
            kind: "CustomResourceDefinition".to_string(),
        },
        metadata: ObjectMeta {
            name: Some(format!("{}.{}", identity.plural, identity.group)),
            ..Default::default()
        },
        spec: DefinitionSpec {
            group: identity.group.clone(),
            versions: vec![DefinitionVersion {
                name: identity.version.clone(),
                served: true,
                storage: true,
            }],
            names: DefinitionNames {
                plural: identity.plural.clone(),
                singular: identity.singular.clone(),
                kind: identity.kind.clone(),
                short_names: identity.short_names.clone(),
            },
            scope: identity.scope,
            subresources,
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn widget_identity() -> ResourceIdentity {
        ResourceIdentity::new("examples.dev", "v1", "Widget", "widgets")
            .short_names(&["wd"])
            .with_status()
            .with_scale("/spec/replicas", "/status/replicas")
    }

    #[test]
    fn manifest_shape() {
        let crd = synthesize(&widget_identity());
        assert_json_eq!(
            serde_json::to_value(&crd).unwrap(),
            json!({
                "apiVersion": "apiextensions.k8s.io/v1beta1",
                "kind": "CustomResourceDefinition",
                "metadata": {"name": "widgets.examples.dev"},
                "spec": {
                    "group": "examples.dev",
                    "versions": [{"name": "v1", "served": true, "storage": true}],
                    "names": {
                        "plural": "widgets",
                        "singular": "widget",
                        "kind": "Widget",
                        "shortNames": ["wd"],
                    },
                    "scope": "Namespaced",
                    "subresources": {
                        "status": {},
                        "scale": {
                            "specReplicasPath": "/spec/replicas",
                            "statusReplicasPath": "/status/replicas",
                        },
                    },
                },
            })
        );
    }

    #[test]
    fn plain_identity_synthesizes_without_subresources() {
        let id = ResourceIdentity::new("examples.dev", "v2", "Gadget", "gadgets").cluster_scoped();
        let crd = synthesize(&id);
        assert!(crd.spec.subresources.is_none());
        assert_eq!(crd.spec.scope, Scope::Cluster);
        assert_eq!(crd.metadata.name.as_deref(), Some("gadgets.examples.dev"));
    }

    #[test]
    fn manifest_is_yaml_serializable() {
        let crd = synthesize(&widget_identity());
        let yaml = serde_yaml::to_string(&crd).unwrap();
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("specReplicasPath: /spec/replicas"));
    }

    #[test]
    fn definitions_are_created_under_the_meta_api() {
        let id = CustomResourceDefinition::identity();
        assert_eq!(
            id.url_path(None),
            "/apis/apiextensions.k8s.io/v1beta1/customresourcedefinitions"
        );
    }
}
