//! RGB to YUV conversion for overlay colors
//!
//! Fixed-point formulas with 10 fractional bits. `Legacy` produces full
//! range values (Y 0-255); `Ccir` produces studio range values as defined by
//! CCIR 601 (Y 16-235, chroma 16-240).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SCALE_BITS: u32 = 10;
const ONE_HALF: i32 = 1 << (SCALE_BITS - 1);

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A color ready to be written into planar YUV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Yuv {
    /// Luma
    pub y: u8,
    /// Blue-difference chroma
    pub u: u8,
    /// Red-difference chroma
    pub v: u8,
}

/// RGB to YUV formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorConversion {
    /// Full range JPEG-style coefficients
    #[default]
    Legacy,
    /// CCIR 601 studio range coefficients
    Ccir,
}

struct Coefficients {
    y: [i32; 3],
    y_offset: i32,
    u: [i32; 3],
    v: [i32; 3],
}

const LEGACY: Coefficients = Coefficients {
    y: [306, 601, 117],
    y_offset: 0,
    u: [-173, -339, 512],
    v: [512, -429, -83],
};

// Legacy coefficients scaled by 219/255 (luma) and 224/255 (chroma)
const CCIR: Coefficients = Coefficients {
    y: [263, 516, 100],
    y_offset: 16 << SCALE_BITS,
    u: [-152, -298, 450],
    v: [450, -377, -73],
};

fn dot(k: &[i32; 3], rgb: [i32; 3]) -> i32 {
    k[0] * rgb[0] + k[1] * rgb[1] + k[2] * rgb[2]
}

fn to_u8(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

impl ColorConversion {
    fn coefficients(self) -> &'static Coefficients {
        match self {
            ColorConversion::Legacy => &LEGACY,
            ColorConversion::Ccir => &CCIR,
        }
    }

    /// Convert an RGB color
    pub fn convert(self, rgb: Rgb) -> Yuv {
        let k = self.coefficients();
        let c = [rgb.0 as i32, rgb.1 as i32, rgb.2 as i32];

        let y = (dot(&k.y, c) + ONE_HALF + k.y_offset) >> SCALE_BITS;
        let u = ((dot(&k.u, c) + ONE_HALF - 1) >> SCALE_BITS) + 128;
        let v = ((dot(&k.v, c) + ONE_HALF - 1) >> SCALE_BITS) + 128;

        Yuv {
            y: to_u8(y),
            u: to_u8(u),
            v: to_u8(v),
        }
    }
}

impl Rgb {
    /// Convert with the given formula
    pub fn to_yuv(self, conversion: ColorConversion) -> Yuv {
        conversion.convert(self)
    }
}
