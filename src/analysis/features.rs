//! Strongly typed facial feature records
//!
//! Parents and the predicted child share one record shape. Continuous traits
//! are addressed through [`PolygenicTrait`], binary traits through
//! [`MendelianTrait`]; both enums carry the string keys used by the
//! configurable coefficient tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::LandmarkSet;

/// Continuous traits blended by weighted averaging plus noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygenicTrait {
    /// Mean eye height over width
    EyeRatio,
    /// Mean eye opening height
    EyeHeight,
    /// Alar width
    NoseWidth,
    /// Bridge top to tip
    NoseLength,
    /// Vertical bridge extent
    NoseBridgeHeight,
    /// Cheek to cheek
    FaceWidth,
    /// Forehead to chin
    FaceHeight,
    /// Jaw angle to jaw angle
    JawWidth,
    /// Upper to lower lip
    LipThickness,
    /// Distance between eye centres
    Interpupillary,
    /// Mouth corner to mouth corner
    MouthWidth,
}

impl PolygenicTrait {
    /// Every continuous trait, in blending order
    pub const ALL: [Self; 11] = [
        Self::EyeRatio,
        Self::NoseWidth,
        Self::NoseLength,
        Self::NoseBridgeHeight,
        Self::FaceWidth,
        Self::FaceHeight,
        Self::JawWidth,
        Self::LipThickness,
        Self::Interpupillary,
        Self::EyeHeight,
        Self::MouthWidth,
    ];

    /// Heritability table key
    pub const fn key(self) -> &'static str {
        match self {
            Self::EyeRatio => "eye_ratio",
            Self::EyeHeight => "eye_height",
            Self::NoseWidth => "nose_width",
            Self::NoseLength => "nose_length",
            Self::NoseBridgeHeight => "nose_bridge_height",
            Self::FaceWidth => "face_width",
            Self::FaceHeight => "face_height",
            Self::JawWidth => "jaw_width",
            Self::LipThickness => "lip_thickness",
            Self::Interpupillary => "interpupillary",
            Self::MouthWidth => "mouth_width",
        }
    }
}

/// Binary traits resolved by a single Bernoulli draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MendelianTrait {
    /// Visible upper eyelid crease
    DoubleEyelid,
    /// Cheek dimples
    Dimple,
    /// Chin cleft
    CleftChin,
    /// V-shaped hairline point
    WidowsPeak,
}

impl MendelianTrait {
    /// Every binary trait, in resolution order
    pub const ALL: [Self; 4] = [
        Self::DoubleEyelid,
        Self::Dimple,
        Self::CleftChin,
        Self::WidowsPeak,
    ];

    /// Mendelian table key
    pub const fn key(self) -> &'static str {
        match self {
            Self::DoubleEyelid => "double_eyelid",
            Self::Dimple => "dimple",
            Self::CleftChin => "cleft_chin",
            Self::WidowsPeak => "widows_peak",
        }
    }
}

/// The eleven continuous facial measurements, in pixels except `eye_ratio`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Distance between eye centres
    pub interpupillary: f64,
    /// Cheek to cheek
    pub face_width: f64,
    /// Forehead to chin
    pub face_height: f64,
    /// Alar width
    pub nose_width: f64,
    /// Bridge top to tip
    pub nose_length: f64,
    /// Vertical bridge extent
    pub nose_bridge_height: f64,
    /// Mean eye opening height
    pub eye_height: f64,
    /// Mean eye height over width
    pub eye_ratio: f64,
    /// Mouth corner to mouth corner
    pub mouth_width: f64,
    /// Upper to lower lip
    pub lip_thickness: f64,
    /// Jaw angle to jaw angle
    pub jaw_width: f64,
}

impl Default for Measurements {
    // Typical adult values used when a field is unknown
    fn default() -> Self {
        Self {
            interpupillary: 60.0,
            face_width: 150.0,
            face_height: 200.0,
            nose_width: 30.0,
            nose_length: 40.0,
            nose_bridge_height: 30.0,
            eye_height: 10.0,
            eye_ratio: 0.3,
            mouth_width: 50.0,
            lip_thickness: 15.0,
            jaw_width: 120.0,
        }
    }
}

impl Measurements {
    /// Value of one trait
    pub const fn get(&self, t: PolygenicTrait) -> f64 {
        match t {
            PolygenicTrait::EyeRatio => self.eye_ratio,
            PolygenicTrait::EyeHeight => self.eye_height,
            PolygenicTrait::NoseWidth => self.nose_width,
            PolygenicTrait::NoseLength => self.nose_length,
            PolygenicTrait::NoseBridgeHeight => self.nose_bridge_height,
            PolygenicTrait::FaceWidth => self.face_width,
            PolygenicTrait::FaceHeight => self.face_height,
            PolygenicTrait::JawWidth => self.jaw_width,
            PolygenicTrait::LipThickness => self.lip_thickness,
            PolygenicTrait::Interpupillary => self.interpupillary,
            PolygenicTrait::MouthWidth => self.mouth_width,
        }
    }

    /// Mutable access to one trait
    pub const fn get_mut(&mut self, t: PolygenicTrait) -> &mut f64 {
        match t {
            PolygenicTrait::EyeRatio => &mut self.eye_ratio,
            PolygenicTrait::EyeHeight => &mut self.eye_height,
            PolygenicTrait::NoseWidth => &mut self.nose_width,
            PolygenicTrait::NoseLength => &mut self.nose_length,
            PolygenicTrait::NoseBridgeHeight => &mut self.nose_bridge_height,
            PolygenicTrait::FaceWidth => &mut self.face_width,
            PolygenicTrait::FaceHeight => &mut self.face_height,
            PolygenicTrait::JawWidth => &mut self.jaw_width,
            PolygenicTrait::LipThickness => &mut self.lip_thickness,
            PolygenicTrait::Interpupillary => &mut self.interpupillary,
            PolygenicTrait::MouthWidth => &mut self.mouth_width,
        }
    }
}

/// Presence flags for the binary traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MendelianFlags {
    /// Visible upper eyelid crease
    pub double_eyelid: bool,
    /// Cheek dimples
    pub dimple: bool,
    /// Chin cleft
    pub cleft_chin: bool,
    /// V-shaped hairline point
    pub widows_peak: bool,
}

impl MendelianFlags {
    /// Whether a trait is present
    pub const fn get(&self, t: MendelianTrait) -> bool {
        match t {
            MendelianTrait::DoubleEyelid => self.double_eyelid,
            MendelianTrait::Dimple => self.dimple,
            MendelianTrait::CleftChin => self.cleft_chin,
            MendelianTrait::WidowsPeak => self.widows_peak,
        }
    }

    /// Set a trait's presence
    pub const fn set(&mut self, t: MendelianTrait, present: bool) {
        match t {
            MendelianTrait::DoubleEyelid => self.double_eyelid = present,
            MendelianTrait::Dimple => self.dimple = present,
            MendelianTrait::CleftChin => self.cleft_chin = present,
            MendelianTrait::WidowsPeak => self.widows_peak = present,
        }
    }
}

/// Perceptual skin colour in 8-bit LAB (L scaled to 0..255, a/b offset by 128)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct SkinColor {
    /// Lightness
    pub l: f64,
    /// Green to red axis
    pub a: f64,
    /// Blue to yellow axis
    pub b: f64,
}

impl SkinColor {
    /// Create a colour from its channels
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Channels as an array
    pub const fn channels(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }
}

impl Default for SkinColor {
    // Neutral medium tone used when cheek sampling fails
    fn default() -> Self {
        Self::new(150.0, 128.0, 128.0)
    }
}

impl From<[f64; 3]> for SkinColor {
    fn from([l, a, b]: [f64; 3]) -> Self {
        Self::new(l, a, b)
    }
}

impl From<SkinColor> for [f64; 3] {
    fn from(c: SkinColor) -> Self {
        c.channels()
    }
}

/// Face outline classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    /// Width close to height
    Round,
    /// Broad with a strong jaw
    Square,
    /// Balanced proportions
    #[default]
    Oval,
    /// Height well above width
    Long,
}

/// Nose width classification relative to face width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoseShape {
    /// Narrow alar base
    Narrow,
    /// Typical width
    #[default]
    Normal,
    /// Broad alar base
    Wide,
}

/// Eye opening classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeSize {
    /// Low height-to-width ratio
    Small,
    /// Typical ratio
    #[default]
    Normal,
    /// High height-to-width ratio
    Large,
}

/// Skin lightness description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    /// Very light
    Fair,
    /// Light
    Light,
    /// Medium
    #[default]
    Medium,
    /// Tanned or darker
    Tan,
}

macro_rules! display_as_serde_name {
    ($($ty:ty => { $($variant:ident => $name:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(match self {
                        $(Self::$variant => $name,)+
                    })
                }
            }
        )+
    };
}

display_as_serde_name! {
    FaceShape => { Round => "round", Square => "square", Oval => "oval", Long => "long" },
    NoseShape => { Narrow => "narrow", Normal => "normal", Wide => "wide" },
    EyeSize => { Small => "small", Normal => "normal", Large => "large" },
    SkinTone => { Fair => "fair", Light => "light", Medium => "medium", Tan => "tan" },
}

/// Discrete categories assigned to a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Categories {
    /// Face outline
    pub face_shape: FaceShape,
    /// Nose width class
    pub nose_shape: NoseShape,
    /// Eye opening class
    pub eye_size: EyeSize,
    /// Skin lightness description
    pub skin_tone: SkinTone,
}

/// Everything known about one face, in the shape consumed by blending
///
/// Parent records come from image analysis; the child record has the same
/// shape with every field derived by the blending engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Continuous traits
    pub measurements: Measurements,
    /// Binary traits
    pub mendelian: MendelianFlags,
    /// Discrete categories
    pub categories: Categories,
    /// Sampled or blended skin colour
    pub skin: SkinColor,
    /// Morph landmarks in pixel coordinates of the source image
    pub landmarks: LandmarkSet,
}

/// Feature record of an analysed parent image
pub type ParentFeatureSet = FeatureSet;

/// Feature record of the predicted child
pub type ChildFeatureSet = FeatureSet;
