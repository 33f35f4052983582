//! Dense `u16` resource-id newtypes.
//!
//! Every resource kind gets its own type so a `TextureId` can never be
//! passed where a `BufferId` is expected, even though both are `u16` on
//! the wire. IDs are opaque handles here: the core only range-checks
//! them, it never interprets what they point to.

use core::fmt;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(u16);

        impl $name {
            /// Builds an id from a raw index. Does not validate range or
            /// density; callers that assign ids (interning, table `add`)
            /// are the only ones entitled to construct arbitrary values.
            pub const fn new(index: u16) -> Self {
                Self(index)
            }

            /// The raw index.
            pub const fn get(self) -> u16 {
                self.0
            }

            /// The raw index widened to `usize`, for use as a `Vec` index.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u16> for $name {
            fn from(index: u16) -> Self {
                Self::new(index)
            }
        }

        impl From<$name> for u16 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id!(
    /// Index into the interned string table (C2).
    StringId
);
dense_id!(
    /// Index into the opaque data/blob section (C3).
    DataId
);
dense_id!(
    /// Index into the WGSL module dependency table (C4).
    WgslId
);
dense_id!(
    /// Shader-module resource id.
    ShaderId
);
dense_id!(
    /// GPU buffer resource id.
    BufferId
);
dense_id!(
    /// GPU texture resource id.
    TextureId
);
dense_id!(
    /// GPU sampler resource id.
    SamplerId
);
dense_id!(
    /// Render or compute pipeline resource id.
    PipelineId
);
dense_id!(
    /// Bind group resource id.
    BindGroupId
);
dense_id!(
    /// Bind group layout resource id.
    BindGroupLayoutId
);
dense_id!(
    /// Pipeline layout resource id.
    PipelineLayoutId
);
dense_id!(
    /// Render bundle resource id.
    RenderBundleId
);
dense_id!(
    /// Texture view resource id.
    TextureViewId
);
dense_id!(
    /// Query set resource id.
    QuerySetId
);
dense_id!(
    /// Decoded image bitmap resource id.
    ImageBitmapId
);
dense_id!(
    /// Embedded WASM module instance id.
    WasmModuleId
);
dense_id!(
    /// Result handle for a `call_wasm_func` invocation.
    WasmCallId
);
dense_id!(
    /// Typed-array (procedurally generated data) resource id.
    TypedArrayId
);
dense_id!(
    /// Render/compute pass resource id.
    PassId
);
dense_id!(
    /// Frame resource id.
    FrameId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_u16() {
        let id = StringId::new(41);
        assert_eq!(u16::from(id), 41);
        assert_eq!(id.index(), 41usize);
    }

    #[test]
    fn distinct_types_do_not_unify() {
        let s = StringId::new(0);
        let d = DataId::new(0);
        assert_eq!(s.get(), d.get());
        // The point of the newtypes is that the above two are not the
        // same Rust type, which the compiler enforces; this test only
        // documents the invariant that the numeric value 0 is valid and
        // independent per namespace.
    }
}
