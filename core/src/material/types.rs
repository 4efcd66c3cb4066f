//! Material data types.

use crate::math::Vec3f;

/// Surface material of a shape.
///
/// Uses the classic ambient/diffuse/specular model. A freshly constructed
/// material holds the format defaults; writers compare against
/// [`SgMaterial::default`] and only emit fields that differ.
///
/// # Example
///
/// ```ignore
/// use stdscene_core::material::SgMaterial;
/// use stdscene_core::math::Vec3f;
///
/// let red = SgMaterial::new()
///     .with_diffuse_color(Vec3f::new(1.0, 0.0, 0.0))
///     .with_transparency(0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SgMaterial {
    /// Diffuse color `[r, g, b]`.
    pub diffuse_color: Vec3f,
    /// Emissive color `[r, g, b]`.
    pub emissive_color: Vec3f,
    /// Specular color `[r, g, b]`.
    pub specular_color: Vec3f,
    /// Ambient intensity relative to the diffuse color (0.0–1.0).
    pub ambient_intensity: f32,
    /// Shininess (0.0–1.0).
    pub shininess: f32,
    /// Transparency (0.0 opaque – 1.0 invisible).
    pub transparency: f32,
}

impl SgMaterial {
    /// Default diffuse color.
    pub const DEFAULT_DIFFUSE: [f32; 3] = [0.8, 0.8, 0.8];
    /// Default ambient intensity.
    pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.2;
    /// Default shininess.
    pub const DEFAULT_SHININESS: f32 = 0.2;

    /// Creates a material with the default values.
    pub fn new() -> Self {
        Self {
            diffuse_color: Vec3f::from(Self::DEFAULT_DIFFUSE),
            emissive_color: Vec3f::zeros(),
            specular_color: Vec3f::zeros(),
            ambient_intensity: Self::DEFAULT_AMBIENT_INTENSITY,
            shininess: Self::DEFAULT_SHININESS,
            transparency: 0.0,
        }
    }

    /// Set the diffuse color.
    #[must_use]
    pub fn with_diffuse_color(mut self, color: Vec3f) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Set the emissive color.
    #[must_use]
    pub fn with_emissive_color(mut self, color: Vec3f) -> Self {
        self.emissive_color = color;
        self
    }

    /// Set the specular color.
    #[must_use]
    pub fn with_specular_color(mut self, color: Vec3f) -> Self {
        self.specular_color = color;
        self
    }

    /// Set the ambient intensity.
    #[must_use]
    pub fn with_ambient_intensity(mut self, intensity: f32) -> Self {
        self.ambient_intensity = intensity;
        self
    }

    /// Set the shininess.
    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the transparency.
    #[must_use]
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
}

impl Default for SgMaterial {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let m = SgMaterial::default();
        assert_eq!(m.diffuse_color, Vec3f::new(0.8, 0.8, 0.8));
        assert_eq!(m.emissive_color, Vec3f::zeros());
        assert_eq!(m.specular_color, Vec3f::zeros());
        assert_eq!(m.ambient_intensity, 0.2);
        assert_eq!(m.shininess, 0.2);
        assert_eq!(m.transparency, 0.0);
    }

    #[test]
    fn builder() {
        let m = SgMaterial::new()
            .with_diffuse_color(Vec3f::new(1.0, 0.0, 0.0))
            .with_emissive_color(Vec3f::new(0.1, 0.1, 0.1))
            .with_specular_color(Vec3f::new(0.5, 0.5, 0.5))
            .with_ambient_intensity(0.3)
            .with_shininess(0.9)
            .with_transparency(0.25);
        assert_eq!(m.diffuse_color.x, 1.0);
        assert_eq!(m.emissive_color.y, 0.1);
        assert_eq!(m.specular_color.z, 0.5);
        assert_eq!(m.ambient_intensity, 0.3);
        assert_eq!(m.shininess, 0.9);
        assert_eq!(m.transparency, 0.25);
        assert_ne!(m, SgMaterial::default());
    }
}
