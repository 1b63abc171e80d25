//! Perceived colour of blackbody emitters and of individual visible wavelengths.
//!
//! The colour science sits behind [`Colorimeter`]: a spectral distribution goes in,
//! CIE XYZ tristimulus values come out, and those are mapped into a display gamut.
//! [`Cie1931`] is the built-in implementation; callers that need a different observer or
//! display space can supply their own.

use std::fmt;

use tracing::debug;

use crate::planck::spectral_radiance;
use crate::{StellarError, require_positive};

/// Sampling grid for a spectral distribution, in nanometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralShape {
    pub start_nm: f64,
    pub end_nm: f64,
    pub interval_nm: f64,
}

impl SpectralShape {
    /// 380–780 nm in 5 nm steps.
    pub const VISIBLE: Self = Self {
        start_nm: 380.0,
        end_nm: 780.0,
        interval_nm: 5.0,
    };

    /// Wavelengths on the grid, end point included.
    pub fn wavelengths(&self) -> impl Iterator<Item = f64> + '_ {
        let steps = if self.interval_nm > 0.0 && self.end_nm >= self.start_nm {
            ((self.end_nm - self.start_nm) / self.interval_nm).round() as usize
        } else {
            0
        };
        (0..=steps).map(move |i| self.start_nm + i as f64 * self.interval_nm)
    }
}

/// Spectral power sampled on a [`SpectralShape`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralDistribution {
    shape: SpectralShape,
    samples: Vec<(f64, f64)>,
}

impl SpectralDistribution {
    /// Planck radiance of a blackbody at `temperature_k`.
    pub fn blackbody(temperature_k: f64, shape: SpectralShape) -> Self {
        let samples = shape
            .wavelengths()
            .map(|nm| (nm, spectral_radiance(nm * 1e-9, temperature_k)))
            .collect();
        Self { shape, samples }
    }

    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// `(wavelength_nm, power)` pairs.
    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }
}

/// CIE 1931 tristimulus values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

/// Spectral distribution → tristimulus → display colour.
pub trait Colorimeter {
    /// Integrate the distribution against the observer's colour matching functions.
    fn tristimulus(&self, sd: &SpectralDistribution) -> Xyz;

    /// Map tristimulus values into display channels. Values may fall outside `[0, 1]`.
    fn to_display(&self, xyz: Xyz) -> [f64; 3];

    /// Display colour of `sd`, normalized so its brightest tristimulus component is one
    /// and clipped into `[0, 1]`. A distribution without power is black.
    fn perceived(&self, sd: &SpectralDistribution) -> [f64; 3] {
        let xyz = self.tristimulus(sd);
        let peak = xyz.max_component();
        if !(peak.is_finite() && peak > 0.0) {
            return [0.0; 3];
        }
        self.to_display(xyz.scaled(1.0 / peak))
            .map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 })
    }
}

/// CIE 1931 2° standard observer rendered into sRGB (D65).
///
/// The colour matching functions use the multi-lobe Gaussian fit of Wyman, Sloan and
/// Shirley (2013), which tracks the tabulated observer closely across the visible band.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cie1931;

impl Cie1931 {
    fn lobe(wavelength_nm: f64, mu: f64, sigma_low: f64, sigma_high: f64) -> f64 {
        let sigma = if wavelength_nm < mu {
            sigma_low
        } else {
            sigma_high
        };
        let t = (wavelength_nm - mu) / sigma;
        (-0.5 * t * t).exp()
    }

    /// `(x̄, ȳ, z̄)` at `wavelength_nm`.
    pub fn matching(wavelength_nm: f64) -> [f64; 3] {
        let l = wavelength_nm;
        let x = 1.056 * Self::lobe(l, 599.8, 37.9, 31.0) + 0.362 * Self::lobe(l, 442.0, 16.0, 26.7)
            - 0.065 * Self::lobe(l, 501.1, 20.4, 26.2);
        let y = 0.821 * Self::lobe(l, 568.8, 46.9, 40.5) + 0.286 * Self::lobe(l, 530.9, 16.3, 31.1);
        let z = 1.217 * Self::lobe(l, 437.0, 11.8, 36.0) + 0.681 * Self::lobe(l, 459.0, 26.0, 13.8);
        [x, y, z]
    }

    fn srgb_encode(linear: f64) -> f64 {
        if linear <= 0.003_130_8 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    }
}

impl Colorimeter for Cie1931 {
    fn tristimulus(&self, sd: &SpectralDistribution) -> Xyz {
        let dl = sd.shape().interval_nm;
        let mut xyz = Xyz {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        for &(nm, power) in sd.samples() {
            let [xb, yb, zb] = Self::matching(nm);
            xyz.x += power * xb * dl;
            xyz.y += power * yb * dl;
            xyz.z += power * zb * dl;
        }
        xyz
    }

    fn to_display(&self, xyz: Xyz) -> [f64; 3] {
        let r = 3.240_454_2 * xyz.x - 1.537_138_5 * xyz.y - 0.498_531_4 * xyz.z;
        let g = -0.969_266_0 * xyz.x + 1.876_010_8 * xyz.y + 0.041_556_0 * xyz.z;
        let b = 0.055_643_4 * xyz.x - 0.204_025_9 * xyz.y + 1.057_225_2 * xyz.z;
        [r, g, b].map(Self::srgb_encode)
    }
}

/// 8-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);

    /// Truncate unit-range channels to 0–255.
    pub fn from_unit(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
        Self(r, g, b)
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Perceived colour of a blackbody.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackbodyColor {
    /// sRGB channels in `[0, 1]`.
    pub rgb: [f64; 3],
    pub display: Rgb,
}

impl BlackbodyColor {
    pub fn hex(&self) -> String {
        self.display.hex()
    }
}

/// Perceived colour of a blackbody at `temperature_k` using the CIE 1931 observer.
pub fn blackbody_color(temperature_k: f64) -> Result<BlackbodyColor, StellarError> {
    blackbody_color_with(&Cie1931, temperature_k)
}

/// Perceived colour of a blackbody at `temperature_k` through `colorimeter`.
pub fn blackbody_color_with<C>(
    colorimeter: &C,
    temperature_k: f64,
) -> Result<BlackbodyColor, StellarError>
where
    C: Colorimeter + ?Sized,
{
    let t = require_positive("temperature", temperature_k)?;
    let sd = SpectralDistribution::blackbody(t, SpectralShape::VISIBLE);
    let rgb = colorimeter.perceived(&sd);
    let rgb_display = Rgb::from_unit(rgb);
    debug!(temperature_k = t, color = %rgb_display, "evaluated blackbody colour");
    Ok(BlackbodyColor { rgb, display: rgb_display })
}

/// Approximate display colour of a single wavelength between 380 and 750 nm.
///
/// This is a piecewise visual aid for spectrum backgrounds, not a colorimetric
/// conversion. Wavelengths outside the band are black.
pub fn spectrum_color(wavelength_nm: f64) -> Rgb {
    let l = wavelength_nm;
    let (r, g, b) = if (380.0..440.0).contains(&l) {
        (-(l - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..490.0).contains(&l) {
        (0.0, (l - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..510.0).contains(&l) {
        (0.0, 1.0, -(l - 510.0) / (510.0 - 490.0))
    } else if (510.0..580.0).contains(&l) {
        ((l - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..645.0).contains(&l) {
        (1.0, -(l - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645.0..=750.0).contains(&l) {
        (1.0, 0.0, 0.0)
    } else {
        return Rgb::BLACK;
    };

    // Dim the ends of the band.
    let factor = if (380.0..420.0).contains(&l) {
        0.3 + 0.7 * (l - 380.0) / (420.0 - 380.0)
    } else if l > 700.0 && l <= 750.0 {
        0.3 + 0.7 * (750.0 - l) / (750.0 - 700.0)
    } else {
        1.0
    };

    let channel = |v: f64| (255.0 * v * factor) as u8;
    Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_shape_has_81_samples() {
        let sd = SpectralDistribution::blackbody(5778.0, SpectralShape::VISIBLE);
        assert_eq!(sd.samples().len(), 81);
        assert_eq!(sd.samples()[0].0, 380.0);
        assert_eq!(sd.samples()[80].0, 780.0);
    }

    #[test]
    fn sun_is_near_white() {
        let color = blackbody_color(5778.0).unwrap();
        let Rgb(r, g, b) = color.display;
        assert!(r > 200 && g > 200 && b > 180, "sun colour = {}", color.hex());
    }

    #[test]
    fn cool_stars_are_red_and_hot_stars_are_blue() {
        let cool = blackbody_color(3000.0).unwrap().rgb;
        let hot = blackbody_color(20_000.0).unwrap().rgb;
        assert!(cool[0] > cool[2], "cool = {cool:?}");
        assert!(hot[2] > hot[0], "hot = {hot:?}");
    }

    #[test]
    fn channels_are_clipped_to_display_range() {
        for t in [800.0, 1500.0, 3000.0, 10_000.0, 40_000.0] {
            let rgb = blackbody_color(t).unwrap().rgb;
            assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)), "T = {t}: {rgb:?}");
        }
    }

    #[test]
    fn powerless_spectrum_renders_black() {
        // Every visible sample overflows the Planck exponent at 10 K.
        let color = blackbody_color(10.0).unwrap();
        assert_eq!(color.display, Rgb::BLACK);
        assert!(blackbody_color(0.0).is_err());
    }

    #[test]
    fn spectrum_colors_follow_the_band() {
        assert_eq!(spectrum_color(300.0), Rgb::BLACK);
        assert_eq!(spectrum_color(800.0), Rgb::BLACK);
        assert_eq!(spectrum_color(650.0), Rgb(255, 0, 0));
        assert_eq!(spectrum_color(440.0), Rgb(0, 0, 255));
        assert_eq!(spectrum_color(380.0).hex(), "#4c004c");
    }

    #[test]
    fn hex_truncates_channels() {
        assert_eq!(Rgb::from_unit([1.0, 0.5, 0.0]).hex(), "#ff7f00");
    }
}
