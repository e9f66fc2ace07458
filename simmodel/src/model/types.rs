use std::fmt::Display;

use array_map::{ArrayMap, Indexable};
use serde::{Deserialize, Serialize};

/// Coarse category of a model.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Indexable)]
pub enum DeviceType {
    R,
    C,
    L,
    D,
    V,
    I,
    Kibis,
    Subckt,
    Spice,
}

pub const DEVICE_TYPE_COUNT: usize = 9;

impl DeviceType {
    pub const ALL: [DeviceType; DEVICE_TYPE_COUNT] = [
        DeviceType::R,
        DeviceType::C,
        DeviceType::L,
        DeviceType::D,
        DeviceType::V,
        DeviceType::I,
        DeviceType::Kibis,
        DeviceType::Subckt,
        DeviceType::Spice,
    ];

    /// The text stored in the device field.
    ///
    /// Also used as the bare marker in a legacy `Value` field.
    pub fn field(&self) -> &'static str {
        match self {
            DeviceType::R => "R",
            DeviceType::C => "C",
            DeviceType::L => "L",
            DeviceType::D => "D",
            DeviceType::V => "V",
            DeviceType::I => "I",
            DeviceType::Kibis => "KIBIS",
            DeviceType::Subckt => "SUBCKT",
            DeviceType::Spice => "SPICE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeviceType::R => "Resistor",
            DeviceType::C => "Capacitor",
            DeviceType::L => "Inductor",
            DeviceType::D => "Diode",
            DeviceType::V => "Voltage Source",
            DeviceType::I => "Current Source",
            DeviceType::Kibis => "IBIS Model",
            DeviceType::Subckt => "Subcircuit",
            DeviceType::Spice => "Raw Spice Element",
        }
    }

    pub fn from_field(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.field().eq_ignore_ascii_case(text.trim()))
    }

    /// The model types belonging to this device, default first.
    pub fn model_types(&self) -> impl Iterator<Item = ModelType> + '_ {
        ModelType::ALL
            .into_iter()
            .filter(move |ty| ty.device_type() == *self)
    }

    pub fn default_model_type(&self) -> ModelType {
        match self {
            DeviceType::R => ModelType::R,
            DeviceType::C => ModelType::C,
            DeviceType::L => ModelType::L,
            DeviceType::D => ModelType::D,
            DeviceType::V => ModelType::VBehavioral,
            DeviceType::I => ModelType::IBehavioral,
            DeviceType::Kibis => ModelType::BufferDevice,
            DeviceType::Subckt => ModelType::Subckt,
            DeviceType::Spice => ModelType::RawSpice,
        }
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// The netlist generator family a model type belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ModelClass {
    Ideal,
    Behavioral,
    /// A device described by a `.model` card.
    Spice,
    Buffer,
    Subckt,
    RawSpice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    R,
    RBehavioral,
    C,
    CBehavioral,
    L,
    LBehavioral,
    D,
    VBehavioral,
    IBehavioral,
    BufferDevice,
    BufferDriverDc,
    BufferDriverRect,
    BufferDriverPrbs,
    Subckt,
    RawSpice,
}

impl ModelType {
    pub const ALL: [ModelType; 15] = [
        ModelType::R,
        ModelType::RBehavioral,
        ModelType::C,
        ModelType::CBehavioral,
        ModelType::L,
        ModelType::LBehavioral,
        ModelType::D,
        ModelType::VBehavioral,
        ModelType::IBehavioral,
        ModelType::BufferDevice,
        ModelType::BufferDriverDc,
        ModelType::BufferDriverRect,
        ModelType::BufferDriverPrbs,
        ModelType::Subckt,
        ModelType::RawSpice,
    ];

    pub fn device_type(&self) -> DeviceType {
        use ModelType::*;
        match self {
            R | RBehavioral => DeviceType::R,
            C | CBehavioral => DeviceType::C,
            L | LBehavioral => DeviceType::L,
            D => DeviceType::D,
            VBehavioral => DeviceType::V,
            IBehavioral => DeviceType::I,
            BufferDevice | BufferDriverDc | BufferDriverRect | BufferDriverPrbs => {
                DeviceType::Kibis
            }
            Subckt => DeviceType::Subckt,
            RawSpice => DeviceType::Spice,
        }
    }

    /// The text stored in the type field. Empty for the plain variant of a device.
    pub fn field(&self) -> &'static str {
        use ModelType::*;
        match self {
            RBehavioral | CBehavioral | LBehavioral | VBehavioral | IBehavioral => "=",
            BufferDevice => "DEVICE",
            BufferDriverDc => "DCDRIVER",
            BufferDriverRect => "RECTDRIVER",
            BufferDriverPrbs => "PRBSDRIVER",
            R | C | L | D | Subckt | RawSpice => "",
        }
    }

    pub fn class(&self) -> ModelClass {
        use ModelType::*;
        match self {
            R | C | L => ModelClass::Ideal,
            RBehavioral | CBehavioral | LBehavioral | VBehavioral | IBehavioral => {
                ModelClass::Behavioral
            }
            D => ModelClass::Spice,
            BufferDevice | BufferDriverDc | BufferDriverRect | BufferDriverPrbs => {
                ModelClass::Buffer
            }
            Subckt => ModelClass::Subckt,
            RawSpice => ModelClass::RawSpice,
        }
    }

    pub fn description(&self) -> &'static str {
        use ModelType::*;
        match self {
            R => "Ideal",
            RBehavioral => "Behavioral",
            C => "Ideal",
            CBehavioral => "Behavioral",
            L => "Ideal",
            LBehavioral => "Behavioral",
            D => "Standard",
            VBehavioral => "Behavioral",
            IBehavioral => "Behavioral",
            BufferDevice => "Device",
            BufferDriverDc => "DC driver",
            BufferDriverRect => "Rectangular wave driver",
            BufferDriverPrbs => "PRBS driver",
            Subckt => "Subcircuit",
            RawSpice => "Raw Spice",
        }
    }

    /// Pin names fixed by the model type.
    ///
    /// Empty for subcircuits and raw elements, whose pins come from elsewhere.
    pub fn pin_names(&self) -> &'static [&'static str] {
        use ModelType::*;
        match self {
            R | RBehavioral | C | CBehavioral | L | LBehavioral | D | VBehavioral
            | IBehavioral => &["+", "-"],
            BufferDevice => &["IN/OUT", "GND"],
            BufferDriverDc | BufferDriverRect | BufferDriverPrbs => &["OUT", "GND"],
            Subckt | RawSpice => &[],
        }
    }

    /// Looks up a model type by its device and type field texts, ignoring case.
    pub fn from_fields(device: DeviceType, ty: &str) -> Option<Self> {
        let ty = ty.trim();
        device
            .model_types()
            .find(|candidate| candidate.field().eq_ignore_ascii_case(ty))
    }
}

impl Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.device_type().description(),
            self.description()
        )
    }
}

/// The model type last chosen for each device type during one editing session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeMemory {
    last: ArrayMap<DeviceType, ModelType, DEVICE_TYPE_COUNT>,
}

impl Default for TypeMemory {
    fn default() -> Self {
        Self {
            last: ArrayMap::new(DeviceType::ALL.map(|device| device.default_model_type())),
        }
    }
}

impl TypeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, device: DeviceType) -> ModelType {
        self.last[device]
    }

    pub fn remember(&mut self, ty: ModelType) {
        self.last[ty.device_type()] = ty;
    }
}
