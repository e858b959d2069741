//! Parameter binding model.
//!
//! Each declared parameter of a handler method carries exactly one
//! [`ParameterBinding`] fixed at registration time, and the resolver picks a
//! sourcing strategy by matching on it — there is no runtime type inspection.
//! A parameter with no explicit binding falls back to
//! [`ParameterBinding::Injected`], which resolves an instance of the declared
//! type through the [`InstanceResolver`] port.

use std::any::TypeId;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::{BoxError, DispatchError, DispatchResult};
use crate::inject::{InstanceResolver, SharedInstance};
use crate::mapping::compile_anchored;

/// How one handler parameter sources its value at invocation time.
#[derive(Debug, Clone)]
pub enum ParameterBinding {
    /// Bind the named request header.
    Header(String),
    /// Bind the named capture group of the matched mapping pattern.
    PathCapture(String),
    /// Bind the named query parameter.
    Query(String),
    /// Resolve an instance of the declared parameter type. This is the
    /// fallback for parameters with no explicit binding.
    Injected {
        /// Type to resolve.
        type_id: TypeId,
        /// Type name, for diagnostics.
        type_name: &'static str,
    },
}

/// One declared parameter slot of a handler method.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    binding: ParameterBinding,
}

impl ParameterSpec {
    /// A slot bound to the named request header.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            binding: ParameterBinding::Header(name.into()),
        }
    }

    /// A slot bound to the named capture group of the matched mapping.
    pub fn path_capture(group: impl Into<String>) -> Self {
        Self {
            binding: ParameterBinding::PathCapture(group.into()),
        }
    }

    /// A slot bound to the named query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            binding: ParameterBinding::Query(name.into()),
        }
    }

    /// An untagged slot, satisfied by instance resolution.
    pub fn injected<T: Send + Sync + 'static>() -> Self {
        Self {
            binding: ParameterBinding::Injected {
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Returns the slot's binding.
    pub fn binding(&self) -> &ParameterBinding {
        &self.binding
    }
}

/// A value produced for one parameter slot.
#[derive(Clone)]
pub enum BoundValue {
    /// A single textual value; `None` when the source was absent.
    Text(Option<String>),
    /// An ordered sequence of textual values (multi-valued headers).
    TextList(Vec<String>),
    /// A resolved instance.
    Instance(SharedInstance),
}

impl std::fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Self::TextList(values) => f.debug_tuple("TextList").field(values).finish(),
            Self::Instance(_) => f.debug_tuple("Instance").finish(),
        }
    }
}

/// Borrowed view of a method's resolved parameter vector, with typed
/// accessors for handler closures.
#[derive(Clone, Copy)]
pub struct Args<'a> {
    values: &'a [BoundValue],
}

impl<'a> Args<'a> {
    /// Wraps a resolved parameter vector.
    pub fn new(values: &'a [BoundValue]) -> Self {
        Self { values }
    }

    /// Number of parameter slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` for a zero-parameter method.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The textual value at `index`, if the slot holds one.
    pub fn text(&self, index: usize) -> Option<&'a str> {
        match self.values.get(index) {
            Some(BoundValue::Text(value)) => value.as_deref(),
            _ => None,
        }
    }

    /// The textual value at `index`, or an error suitable for returning from
    /// a handler closure.
    pub fn required_text(&self, index: usize) -> Result<&'a str, BoxError> {
        self.text(index)
            .ok_or_else(|| format!("missing text value in parameter slot {index}").into())
    }

    /// The textual sequence at `index`; empty for any other slot shape.
    pub fn texts(&self, index: usize) -> &'a [String] {
        match self.values.get(index) {
            Some(BoundValue::TextList(values)) => values,
            _ => &[],
        }
    }

    /// Downcasts the instance at `index` to its concrete type.
    pub fn instance<T: Send + Sync + 'static>(&self, index: usize) -> Option<Arc<T>> {
        match self.values.get(index) {
            Some(BoundValue::Instance(shared)) => Arc::clone(shared).downcast::<T>().ok(),
            _ => None,
        }
    }
}

/// Port for producing one bound value per declared parameter slot.
///
/// Called once per slot in declaration order by the invoke pipeline. The two
/// lifecycle variants differ only in header handling (single value vs. the
/// full ordered sequence); both resolve captures, query parameters, and
/// injected instances identically through the helpers below.
pub trait ParameterResolver: Send + Sync {
    /// Produces the value for `spec` from the request and the selected match.
    ///
    /// `mapping` and `path` are the effective mapping string and original
    /// path recorded in the match.
    fn resolve(
        &self,
        request: &dyn RequestContext,
        mapping: &str,
        path: &str,
        spec: &ParameterSpec,
    ) -> DispatchResult<BoundValue>;
}

/// Binds a named capture group by re-applying the effective mapping to the
/// recorded path.
///
/// The mapping already matched the path during selection, so a mismatch here
/// (or a group name absent from the pattern) indicates a misconfigured
/// registration and is a hard error, never a silent `None`. A group that
/// exists but did not participate in the match resolves to `None`.
pub fn capture_value(mapping: &str, path: &str, group: &str) -> DispatchResult<Option<String>> {
    let pattern = compile_anchored(mapping).map_err(|source| DispatchError::InvalidCapturePattern {
        mapping: mapping.to_string(),
        source,
    })?;

    if !pattern.capture_names().flatten().any(|name| name == group) {
        return Err(DispatchError::CaptureUnbound {
            group: group.to_string(),
            mapping: mapping.to_string(),
        });
    }

    let captures = pattern
        .captures(path)
        .ok_or_else(|| DispatchError::CaptureUnbound {
            group: group.to_string(),
            mapping: mapping.to_string(),
        })?;

    Ok(captures.name(group).map(|m| m.as_str().to_string()))
}

/// Resolves an injected parameter instance, failing with the declared type
/// name when the resolver has nothing registered for it.
pub fn injected_value(
    instances: &dyn InstanceResolver,
    type_id: TypeId,
    type_name: &str,
) -> DispatchResult<BoundValue> {
    instances
        .resolve(type_id)
        .map(BoundValue::Instance)
        .ok_or_else(|| DispatchError::unresolved(type_name))
}
