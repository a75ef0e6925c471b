//! Laptop model

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// Byte-scale unit for memory and storage sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryUnit {
    Bit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl MemoryUnit {
    /// Power-of-two shift converting one unit into bits
    fn bit_shift(self) -> u32 {
        match self {
            MemoryUnit::Bit => 0,
            MemoryUnit::Byte => 3,
            MemoryUnit::Kilobyte => 13,
            MemoryUnit::Megabyte => 23,
            MemoryUnit::Gigabyte => 33,
            MemoryUnit::Terabyte => 43,
        }
    }
}

impl std::fmt::Display for MemoryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MemoryUnit::Bit => "b",
            MemoryUnit::Byte => "B",
            MemoryUnit::Kilobyte => "KB",
            MemoryUnit::Megabyte => "MB",
            MemoryUnit::Gigabyte => "GB",
            MemoryUnit::Terabyte => "TB",
        };
        write!(f, "{}", label)
    }
}

/// A memory or storage size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Memory {
    pub value: u64,
    pub unit: MemoryUnit,
}

impl Memory {
    pub fn new(value: u64, unit: MemoryUnit) -> Self {
        Self { value, unit }
    }

    pub fn gigabytes(value: u64) -> Self {
        Self::new(value, MemoryUnit::Gigabyte)
    }

    /// Size normalized to bits. Wide enough that no `u64` value overflows.
    pub fn to_bits(&self) -> u128 {
        u128::from(self.value) << self.unit.bit_shift()
    }
}

impl std::fmt::Display for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cpu {
    pub brand: String,
    pub name: String,
    pub number_cores: u32,
    /// Always >= `number_cores`
    pub number_threads: u32,
    pub min_ghz: f64,
    pub max_ghz: f64,
}

/// Graphics card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Gpu {
    pub brand: String,
    pub name: String,
    pub min_ghz: f64,
    pub max_ghz: f64,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageDriver {
    Unknown,
    Hdd,
    Ssd,
}

/// Storage device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Storage {
    pub driver: StorageDriver,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Panel {
    Unknown,
    Ips,
    Oled,
}

/// Display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Screen {
    pub size_inch: f32,
    pub resolution: Resolution,
    pub panel: Panel,
    pub multitouch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyboardLayout {
    Unknown,
    Qwerty,
    Qwertz,
    Azerty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Keyboard {
    pub layout: KeyboardLayout,
    pub backlit: bool,
}

/// Laptop weight, in exactly one unit.
///
/// Serialized as `{"weight_kg": 1.4}` or `{"weight_lb": 3.1}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    WeightKg(f64),
    WeightLb(f64),
}

impl Weight {
    const LB_PER_KG: f64 = 2.204_622_621_8;

    pub fn kilograms(&self) -> f64 {
        match *self {
            Weight::WeightKg(kg) => kg,
            Weight::WeightLb(lb) => lb / Self::LB_PER_KG,
        }
    }
}

// ---------------------------------------------------------------------------
// Laptop
// ---------------------------------------------------------------------------

/// Laptop record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_components"))]
pub struct Laptop {
    /// UUID; generated by the server when empty
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpu: Option<Cpu>,
    #[serde(default)]
    pub ram: Option<Memory>,
    #[serde(default)]
    pub gpus: Vec<Gpu>,
    #[serde(default)]
    pub storages: Vec<Storage>,
    #[serde(default)]
    pub screen: Option<Screen>,
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
    #[serde(default)]
    pub weight: Option<Weight>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price_usd: f64,
    #[serde(default)]
    pub release_year: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn validate_components(laptop: &Laptop) -> Result<(), ValidationError> {
    if let Some(cpu) = &laptop.cpu {
        if cpu.number_threads < cpu.number_cores {
            return Err(ValidationError::new("cpu_threads")
                .with_message(Cow::from("CPU thread count is lower than its core count")));
        }
        if cpu.min_ghz > cpu.max_ghz {
            return Err(ValidationError::new("cpu_clock")
                .with_message(Cow::from("CPU minimum clock exceeds its maximum clock")));
        }
    }
    if let Some(Weight::WeightKg(w) | Weight::WeightLb(w)) = laptop.weight {
        if w < 0.0 {
            return Err(ValidationError::new("weight")
                .with_message(Cow::from("Weight must not be negative")));
        }
    }
    Ok(())
}

/// Search criteria. Every bound is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Filter {
    pub max_price_usd: f64,
    #[serde(default)]
    pub min_cpu_cores: u32,
    #[serde(default)]
    pub min_cpu_ghz: f64,
    /// No RAM bound when absent
    #[serde(default)]
    pub min_ram: Option<Memory>,
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "price <= {}, cores >= {}, ghz >= {}",
            self.max_price_usd, self.min_cpu_cores, self.min_cpu_ghz
        )?;
        if let Some(ram) = &self.min_ram {
            write!(f, ", ram >= {}", ram)?;
        }
        Ok(())
    }
}

/// Create laptop request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLaptopRequest {
    pub laptop: Laptop,
}

/// Create laptop response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLaptopResponse {
    pub id: String,
}

/// Search laptops request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchLaptopRequest {
    pub filter: Filter,
}

/// One line of the search response stream
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchLaptopResponse {
    pub laptop: Laptop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_normalization() {
        assert!(Memory::new(4096, MemoryUnit::Megabyte).to_bits() < Memory::gigabytes(8).to_bits());
        assert_eq!(
            Memory::new(8192, MemoryUnit::Megabyte).to_bits(),
            Memory::gigabytes(8).to_bits()
        );
        assert!(Memory::new(1, MemoryUnit::Terabyte).to_bits() > Memory::gigabytes(1000).to_bits());
        assert_eq!(Memory::new(1, MemoryUnit::Byte).to_bits(), 8);
    }

    #[test]
    fn test_memory_no_overflow() {
        let huge = Memory::new(u64::MAX, MemoryUnit::Terabyte);
        assert!(huge.to_bits() > u128::from(u64::MAX));
    }

    #[test]
    fn test_weight_serialization() {
        let json = serde_json::to_value(Weight::WeightKg(1.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "weight_kg": 1.5 }));

        let weight: Weight = serde_json::from_value(serde_json::json!({ "weight_lb": 3.3 })).unwrap();
        assert_eq!(weight, Weight::WeightLb(3.3));

        // Both units at once is not a weight
        let both = serde_json::from_value::<Weight>(serde_json::json!({ "weight_kg": 1.0, "weight_lb": 2.2 }));
        assert!(both.is_err());
    }

    #[test]
    fn test_weight_kilograms() {
        assert_eq!(Weight::WeightKg(2.0).kilograms(), 2.0);
        let kg = Weight::WeightLb(2.204_622_621_8).kilograms();
        assert!((kg - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimal_laptop_deserializes() {
        let laptop: Laptop = serde_json::from_str(r#"{"price_usd": 1200.0}"#).unwrap();
        assert!(laptop.id.is_empty());
        assert!(laptop.cpu.is_none());
        assert!(laptop.weight.is_none());
        assert!(laptop.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut laptop = Laptop {
            cpu: Some(Cpu {
                brand: "Intel".to_string(),
                name: "Core i7-9750H".to_string(),
                number_cores: 6,
                number_threads: 12,
                min_ghz: 2.6,
                max_ghz: 4.5,
            }),
            price_usd: 1800.0,
            ..Default::default()
        };
        assert!(laptop.validate().is_ok());

        laptop.price_usd = -1.0;
        assert!(laptop.validate().is_err());
        laptop.price_usd = 1800.0;

        if let Some(cpu) = laptop.cpu.as_mut() {
            cpu.number_threads = 4;
        }
        assert!(laptop.validate().is_err());
    }

    #[test]
    fn test_filter_display() {
        let filter = Filter {
            max_price_usd: 2000.0,
            min_cpu_cores: 4,
            min_cpu_ghz: 2.2,
            min_ram: Some(Memory::gigabytes(8)),
        };
        assert_eq!(filter.to_string(), "price <= 2000, cores >= 4, ghz >= 2.2, ram >= 8 GB");
    }
}
