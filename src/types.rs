use crate::core::UniformLocation;

/// `Globals` uniform block as laid out by std140
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view: [f32; 16],
    pub size: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

/// Value type of a uniform in the `Globals` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Vec2,
    Mat4,
}

impl UniformKind {
    /// Number of f32 components
    pub const fn len(self) -> usize {
        match self {
            UniformKind::Float => 1,
            UniformKind::Vec2 => 2,
            UniformKind::Mat4 => 16,
        }
    }
}

/// Name, byte offset and type of each `Globals` member
pub const GLOBALS_LAYOUT: [(&str, u32, UniformKind); 3] = [
    ("view", 0, UniformKind::Mat4),
    ("size", 64, UniformKind::Vec2),
    ("time", 72, UniformKind::Float),
];

impl Globals {
    /// Byte offset of the member called `name`, if there is one
    pub fn locate(name: &str) -> Option<UniformLocation> {
        GLOBALS_LAYOUT
            .iter()
            .find(|(member, _, _)| *member == name)
            .map(|&(_, offset, _)| UniformLocation(offset))
    }

    /// Type of the member starting at `location`
    pub fn kind_at(location: UniformLocation) -> Option<UniformKind> {
        GLOBALS_LAYOUT
            .iter()
            .find(|(_, offset, _)| *offset == location.0)
            .map(|&(_, _, kind)| kind)
    }

    /// Overwrite the member at `location` if `values` matches its type.
    /// Returns false and leaves the block untouched otherwise.
    pub fn write(&mut self, location: UniformLocation, values: &[f32]) -> bool {
        match Self::kind_at(location) {
            Some(kind) if kind.len() == values.len() => {
                let start = location.0 as usize;
                let end = start + std::mem::size_of_val(values);
                bytemuck::bytes_of_mut(self)[start..end].copy_from_slice(bytemuck::cast_slice(values));
                true
            }
            _ => false,
        }
    }
}
