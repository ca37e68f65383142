use std::path::Path;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..bound`.
    fn next_below(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const BASE_COLORS: &[(&str, &str)] = &[
    ("Black", "05131D"),
    ("Blue", "0055BF"),
    ("Green", "237841"),
    ("Red", "C91A09"),
    ("Yellow", "F2CD37"),
    ("White", "FFFFFF"),
    ("Light Gray", "9BA19D"),
    ("Dark Gray", "6D6E5C"),
    ("Brown", "583927"),
    ("Tan", "E4CD9E"),
    ("Orange", "FE8A18"),
    ("Lime", "BBE90B"),
    ("Dark Blue", "0A3463"),
    ("Dark Red", "720E0F"),
    ("Sand Green", "A0BCAC"),
];

const TRANS_COLORS: &[(&str, &str)] = &[
    ("Trans-Clear", "FCFCFC"),
    ("Trans-Red", "C91A09"),
    ("Trans-Light Blue", "AEEFEC"),
    ("Trans-Green", "84B68D"),
    ("Trans-Yellow", "F5CD2F"),
];

/// (id, name, parent id or 0 for roots)
const THEMES: &[(u32, &str, u32)] = &[
    (1, "Town", 0),
    (2, "Space", 0),
    (3, "Castle", 0),
    (4, "Technic", 0),
    (5, "Pirates", 0),
    (6, "Trains", 1),
    (7, "Harbor", 1),
    (8, "Classic Space", 2),
    (9, "Blacktron", 2),
    (10, "Knights", 3),
    (11, "Model Team", 4),
    (12, "Imperial Guards", 5),
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).expect("Failed to create data directory");

    // ---- colors.csv ----
    let mut writer =
        csv::Writer::from_path(out_dir.join("colors.csv")).expect("Failed to create colors.csv");
    writer
        .write_record(["id", "name", "rgb", "is_trans"])
        .expect("Failed to write colors header");
    let mut color_id = 0;
    for &(name, rgb) in BASE_COLORS {
        let id_field = color_id.to_string();
        writer
            .write_record([id_field.as_str(), name, rgb, "f"])
            .expect("Failed to write color row");
        color_id += 1;
    }
    for &(name, rgb) in TRANS_COLORS {
        let id_field = color_id.to_string();
        writer
            .write_record([id_field.as_str(), name, rgb, "t"])
            .expect("Failed to write color row");
        color_id += 1;
    }
    writer.flush().expect("Failed to flush colors.csv");

    // ---- themes.csv ----
    let mut writer =
        csv::Writer::from_path(out_dir.join("themes.csv")).expect("Failed to create themes.csv");
    writer
        .write_record(["id", "name", "parent_id"])
        .expect("Failed to write themes header");
    for &(id, name, parent) in THEMES {
        let id_field = id.to_string();
        let parent_field = if parent == 0 {
            String::new()
        } else {
            parent.to_string()
        };
        writer
            .write_record([id_field.as_str(), name, parent_field.as_str()])
            .expect("Failed to write theme row");
    }
    writer.flush().expect("Failed to flush themes.csv");

    // ---- sets.csv ----
    // Release counts and part counts both grow over the years; the last
    // year stays sparse so the partial-year trim has something to hide.
    let mut writer =
        csv::Writer::from_path(out_dir.join("sets.csv")).expect("Failed to create sets.csv");
    writer
        .write_record(["set_num", "name", "year", "theme_id", "num_parts"])
        .expect("Failed to write sets header");

    let mut set_no = 100;
    let mut total_sets = 0usize;
    for year in 1955..=2024 {
        let growth = (year - 1955) as f64;
        let releases = if year == 2024 {
            2
        } else {
            2 + (growth / 4.0) as usize + rng.next_below(3)
        };

        for _ in 0..releases {
            let (theme_id, theme_name, _) = THEMES[rng.next_below(THEMES.len())];
            let mean_parts = 30.0 + growth * 8.0;
            let num_parts = rng.gauss(mean_parts, mean_parts / 3.0).max(1.0) as u32;

            writer
                .write_record([
                    &format!("{set_no}-1"),
                    &format!("{theme_name} Set {set_no}"),
                    &year.to_string(),
                    &theme_id.to_string(),
                    &num_parts.to_string(),
                ])
                .expect("Failed to write set row");
            set_no += 1;
            total_sets += 1;
        }
    }
    writer.flush().expect("Failed to flush sets.csv");

    println!(
        "Wrote {} colors, {} themes, {total_sets} sets to {}",
        BASE_COLORS.len() + TRANS_COLORS.len(),
        THEMES.len(),
        out_dir.display()
    );
}
