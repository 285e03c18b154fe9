//! Instance data structures for GPU upload.

use bytemuck::{Pod, Zeroable};

/// Per-instance data consumed by an instanced draw of unit primitives.
///
/// Memory layout is three vec4s (48 bytes), 16-byte friendly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// World position (x, y, z) + rotation about Y in w (radians).
    pub position_rotation: [f32; 4],

    /// Scale (x, y, z) + primitive id in w.
    pub scale_primitive: [f32; 4],

    /// Linear RGBA colour.
    pub color: [f32; 4],
}

impl InstanceData {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Primitive id stored in `scale_primitive[3]`.
    #[must_use]
    pub fn primitive_id(&self) -> u32 {
        self.scale_primitive[3] as u32
    }
}

/// Views a packed instance list as bytes for a buffer upload.
#[must_use]
pub fn as_bytes(instances: &[InstanceData]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_data_size() {
        // 3 vec4s * 16 bytes each
        assert_eq!(InstanceData::SIZE, 48);
    }

    #[test]
    fn test_instance_alignment() {
        assert_eq!(std::mem::align_of::<InstanceData>(), 4);
    }

    #[test]
    fn test_as_bytes_len() {
        let instances = vec![InstanceData::default(); 3];
        assert_eq!(as_bytes(&instances).len(), 3 * InstanceData::SIZE);
    }
}
