use std::sync::Arc;

use batchfn_core::{IndexMask, Signature, SignatureBuilder, Vec3};
use batchfn_vm::{Context, MultiFunction, Params};

use crate::noise::{NoiseProvider, PerlinNoise};

/// Lookup offset that decorrelates the three components of vector noise.
const COMPONENT_OFFSET: f32 = 1000.0;

/// Scalar noise of a position, scaled by `Amplitude`.
pub struct PerlinNoise1d {
    provider: Arc<dyn NoiseProvider>,
    signature: Signature,
}

impl PerlinNoise1d {
    pub fn new() -> Self {
        Self::with_provider(Arc::new(PerlinNoise::new()))
    }

    pub fn with_provider(provider: Arc<dyn NoiseProvider>) -> Self {
        Self {
            provider,
            signature: SignatureBuilder::new("Perlin Noise 3D to 1D")
                .single_input::<Vec3>("Position")
                .single_input::<f32>("Amplitude")
                .single_input::<f32>("Scale")
                .single_output::<f32>("Noise")
                .build(),
        }
    }
}

impl MultiFunction for PerlinNoise1d {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let positions = params.readonly_single_input::<Vec3>(0, "Position");
        let amplitudes = params.readonly_single_input::<f32>(1, "Amplitude");
        let scales = params.readonly_single_input::<f32>(2, "Scale");
        let r_noise = params.uninitialized_single_output::<f32>(3, "Noise");

        for i in mask {
            let pos = positions[i];
            let noise = self.provider.noise(scales[i], pos.x, pos.y, pos.z);
            r_noise[i] = noise * amplitudes[i];
        }
    }
}

/// Vector noise of a position: one scalar lookup per component, each at an
/// offset position, scaled by `Amplitude`.
pub struct PerlinNoise3d {
    provider: Arc<dyn NoiseProvider>,
    signature: Signature,
}

impl PerlinNoise3d {
    pub fn new() -> Self {
        Self::with_provider(Arc::new(PerlinNoise::new()))
    }

    pub fn with_provider(provider: Arc<dyn NoiseProvider>) -> Self {
        Self {
            provider,
            signature: SignatureBuilder::new("Perlin Noise 3D to 3D")
                .single_input::<Vec3>("Position")
                .single_input::<f32>("Amplitude")
                .single_input::<f32>("Scale")
                .single_output::<Vec3>("Noise")
                .build(),
        }
    }
}

impl MultiFunction for PerlinNoise3d {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, mask: &IndexMask<'_>, params: &mut Params<'_>, _context: &Context<'_>) {
        let positions = params.readonly_single_input::<Vec3>(0, "Position");
        let amplitudes = params.readonly_single_input::<f32>(1, "Amplitude");
        let scales = params.readonly_single_input::<f32>(2, "Scale");
        let r_noise = params.uninitialized_single_output::<Vec3>(3, "Noise");

        for i in mask {
            let (p, scale) = (positions[i], scales[i]);
            let x = self.provider.noise(scale, p.x, p.y, p.z + COMPONENT_OFFSET);
            let y = self.provider.noise(scale, p.x, p.y + COMPONENT_OFFSET, p.z);
            let z = self.provider.noise(scale, p.x + COMPONENT_OFFSET, p.y, p.z);
            r_noise[i] = Vec3::new(x, y, z) * amplitudes[i];
        }
    }
}

impl Default for PerlinNoise1d {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PerlinNoise3d {
    fn default() -> Self {
        Self::new()
    }
}
