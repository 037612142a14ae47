//! Deterministic noise providers.

/// Scalar noise of a point, in `[0, 1]`.
pub trait NoiseProvider: Send + Sync {
    /// Noise at `(x, y, z) / scale`. A zero `scale` leaves the coordinates as is.
    fn noise(&self, scale: f32, x: f32, y: f32, z: f32) -> f32;
}

/// Reference permutation for improved Perlin noise.
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204, 176,
    115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141, 128,
    195, 78, 66, 215, 61, 156, 180,
];

/// Improved Perlin noise remapped to `[0, 1]`.
#[derive(Clone)]
pub struct PerlinNoise {
    /// Permutation doubled for wrap-free lookups.
    perm: [u8; 512],
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl PerlinNoise {
    /// Noise over the reference permutation.
    pub fn new() -> Self {
        Self::from_permutation(&REFERENCE_PERMUTATION)
    }

    /// Noise over a permutation shuffled from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut permutation = REFERENCE_PERMUTATION;
        let mut state = seed;
        for i in (1..permutation.len()).rev() {
            let j = (splitmix64(&mut state) % (i as u64 + 1)) as usize;
            permutation.swap(i, j);
        }
        Self::from_permutation(&permutation)
    }

    fn from_permutation(permutation: &[u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = permutation[i & 255];
        }
        Self { perm }
    }

    /// Signed noise in `[-1, 1]`.
    pub fn signed(&self, x: f32, y: f32, z: f32) -> f32 {
        let p = &self.perm;
        let (xi, yi, zi) = (lattice(x), lattice(y), lattice(z));
        let (xf, yf, zf) = (x - x.floor(), y - y.floor(), z - z.floor());
        let (u, v, w) = (fade(xf), fade(yf), fade(zf));

        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], xf, yf, zf), grad(p[ba], xf - 1.0, yf, zf)),
                lerp(
                    u,
                    grad(p[ab], xf, yf - 1.0, zf),
                    grad(p[bb], xf - 1.0, yf - 1.0, zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], xf, yf, zf - 1.0),
                    grad(p[ba + 1], xf - 1.0, yf, zf - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], xf, yf - 1.0, zf - 1.0),
                    grad(p[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
                ),
            ),
        )
    }
}

impl NoiseProvider for PerlinNoise {
    fn noise(&self, scale: f32, x: f32, y: f32, z: f32) -> f32 {
        let (x, y, z) = if scale != 0.0 {
            (x / scale, y / scale, z / scale)
        } else {
            (x, y, z)
        };
        (0.5 + 0.5 * self.signed(x, y, z)).clamp(0.0, 1.0)
    }
}

/// Lattice cell of `v`, wrapped to the permutation period.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lattice(v: f32) -> usize {
    (v.floor() as i64 & 255) as usize
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
