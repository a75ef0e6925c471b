//! Random laptop generator for demos and tests

use chrono::Utc;
use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use crate::models::laptop::{
    Cpu, Gpu, Keyboard, KeyboardLayout, Laptop, Memory, MemoryUnit, Panel, Resolution, Screen,
    Storage, StorageDriver, Weight,
};

const LAPTOP_MODELS: &[(&str, &[&str])] = &[
    ("Apple", &["Macbook Air", "Macbook Pro"]),
    ("Dell", &["Latitude", "Vostro", "XPS", "Alienware"]),
    ("Lenovo", &["Thinkpad X1", "Thinkpad P1", "Thinkpad P53"]),
];

const CPU_MODELS: &[(&str, &[&str])] = &[
    (
        "Intel",
        &["Xeon E-2286M", "Core i9-9980HK", "Core i7-9750H", "Core i5-9400F", "Core i3-1005G1"],
    ),
    ("AMD", &["Ryzen 7 PRO 2700U", "Ryzen 5 PRO 3500U", "Ryzen 3 PRO 3200GE"]),
];

const GPU_MODELS: &[(&str, &[&str])] = &[
    ("NVIDIA", &["RTX 2060", "RTX 2070", "GTX 1660-Ti", "GTX 1070"]),
    ("AMD", &["RX 590", "RX 580", "RX 5500-XT", "RX Vega-56"]),
];

fn pick_model<R: Rng>(rng: &mut R, table: &[(&str, &[&str])]) -> (String, String) {
    match table.choose(rng) {
        Some((brand, names)) => {
            let name = names.choose(rng).copied().unwrap_or_default();
            (brand.to_string(), name.to_string())
        }
        None => (String::new(), String::new()),
    }
}

pub fn new_keyboard() -> Keyboard {
    let mut rng = rand::thread_rng();
    let layout = [KeyboardLayout::Qwerty, KeyboardLayout::Qwertz, KeyboardLayout::Azerty]
        .choose(&mut rng)
        .copied()
        .unwrap_or(KeyboardLayout::Unknown);
    Keyboard {
        layout,
        backlit: rng.gen_bool(0.5),
    }
}

pub fn new_cpu() -> Cpu {
    let mut rng = rand::thread_rng();
    let (brand, name) = pick_model(&mut rng, CPU_MODELS);

    let number_cores = rng.gen_range(2..=8);
    let number_threads = rng.gen_range(number_cores..=12);
    let min_ghz = rng.gen_range(2.0..3.5);
    let max_ghz = rng.gen_range(min_ghz..5.0);

    Cpu {
        brand,
        name,
        number_cores,
        number_threads,
        min_ghz,
        max_ghz,
    }
}

pub fn new_gpu() -> Gpu {
    let mut rng = rand::thread_rng();
    let (brand, name) = pick_model(&mut rng, GPU_MODELS);

    let min_ghz = rng.gen_range(1.0..1.5);
    let max_ghz = rng.gen_range(min_ghz..2.0);

    Gpu {
        brand,
        name,
        min_ghz,
        max_ghz,
        memory: Memory::gigabytes(rng.gen_range(2..=6)),
    }
}

pub fn new_ram() -> Memory {
    Memory::gigabytes(rand::thread_rng().gen_range(4..=64))
}

pub fn new_ssd() -> Storage {
    Storage {
        driver: StorageDriver::Ssd,
        memory: Memory::gigabytes(rand::thread_rng().gen_range(128..=1024)),
    }
}

pub fn new_hdd() -> Storage {
    Storage {
        driver: StorageDriver::Hdd,
        memory: Memory::new(rand::thread_rng().gen_range(1..=6), MemoryUnit::Terabyte),
    }
}

pub fn new_screen() -> Screen {
    let mut rng = rand::thread_rng();
    let height = rng.gen_range(1080..=4320);
    let width = height * 16 / 9;
    let panel = [Panel::Ips, Panel::Oled]
        .choose(&mut rng)
        .copied()
        .unwrap_or(Panel::Unknown);

    Screen {
        size_inch: rng.gen_range(13.0..17.0),
        resolution: Resolution { width, height },
        panel,
        multitouch: rng.gen_bool(0.5),
    }
}

/// A complete laptop with a fresh random id
pub fn new_laptop() -> Laptop {
    let mut rng = rand::thread_rng();
    let (brand, name) = pick_model(&mut rng, LAPTOP_MODELS);

    Laptop {
        id: Uuid::new_v4().to_string(),
        brand,
        name,
        cpu: Some(new_cpu()),
        ram: Some(new_ram()),
        gpus: vec![new_gpu()],
        storages: vec![new_ssd(), new_hdd()],
        screen: Some(new_screen()),
        keyboard: Some(new_keyboard()),
        weight: Some(Weight::WeightKg(rng.gen_range(1.0..3.0))),
        price_usd: rng.gen_range(1500.0..3500.0),
        release_year: rng.gen_range(2015..=2019),
        updated_at: Some(Utc::now()),
    }
}
