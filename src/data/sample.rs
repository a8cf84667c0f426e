//! Synthetic scraper output for demos and tests.
//!
//! Listings follow an exponential depreciation curve
//!
//! `price(m) = floor + (new_price - floor) * exp(-m / decay_km)`
//!
//! with multiplicative log-normal noise, and are rendered the way the
//! classifieds site prints them (`"CHF 25'900.–"`, `"119'333 km"`). A share
//! of rows is deliberately malformed so the cleaner has something to drop.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{RawField, RawListing};
use crate::error::{EvalError, EvalResult};

/// Generator settings. All randomness derives from `seed`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub max_mileage: f64,
    pub new_price: f64,
    pub floor_price: f64,
    pub decay_km: f64,
    /// Standard deviation of the log-price noise.
    pub noise_sigma: f64,
    /// Probability that a row is unusable (price on request, no mileage).
    pub malformed_rate: f64,
    /// Probability that a row is an unregistered new car.
    pub new_vehicle_rate: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 120,
            seed: 42,
            max_mileage: 150000.0,
            new_price: 45000.0,
            floor_price: 6000.0,
            decay_km: 90000.0,
            noise_sigma: 0.08,
            malformed_rate: 0.05,
            new_vehicle_rate: 0.03,
        }
    }
}

impl SampleConfig {
    /// Noise-free price at `mileage`.
    pub fn expected_price(&self, mileage: f64) -> f64 {
        self.floor_price + (self.new_price - self.floor_price) * (-mileage / self.decay_km).exp()
    }

    fn validate(&self) -> EvalResult<()> {
        let probs_ok = (0.0..1.0).contains(&self.malformed_rate)
            && (0.0..1.0).contains(&self.new_vehicle_rate)
            && self.malformed_rate + self.new_vehicle_rate < 1.0;
        if !probs_ok {
            return Err(EvalError::InvalidConfig("invalid sample probabilities".to_string()));
        }
        if !(self.max_mileage.is_finite() && self.max_mileage > 0.0) {
            return Err(EvalError::InvalidConfig("sample max mileage must be > 0".to_string()));
        }
        if !(self.floor_price > 0.0 && self.new_price > self.floor_price && self.decay_km > 0.0) {
            return Err(EvalError::InvalidConfig("invalid sample depreciation curve".to_string()));
        }
        if !(self.noise_sigma.is_finite() && self.noise_sigma >= 0.0) {
            return Err(EvalError::InvalidConfig("sample noise must be >= 0".to_string()));
        }
        Ok(())
    }
}

/// Generate `config.count` scraper-shaped listings.
pub fn generate_sample(config: &SampleConfig) -> EvalResult<Vec<RawListing>> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_sigma)
        .map_err(|e| EvalError::InvalidConfig(format!("noise distribution error: {e}")))?;

    let mut out = Vec::with_capacity(config.count);
    for i in 0..config.count {
        let title = format!("Sample car #{:03}", i + 1);
        let roll: f64 = rng.r#gen();

        if roll < config.malformed_rate {
            // Alternate between the two kinds of unusable rows the site shows.
            let listing = if i % 2 == 0 {
                RawListing::new(title, "Preis auf Anfrage", format_km(rng.gen_range(0.0..=config.max_mileage)))
            } else {
                RawListing::new(title, format_chf(config.expected_price(0.0)), RawField::Missing)
            };
            out.push(listing);
            continue;
        }

        let is_new = roll < config.malformed_rate + config.new_vehicle_rate;
        let mileage = if is_new {
            0.0
        } else {
            rng.gen_range(0.0..=config.max_mileage).round()
        };

        // Mean-corrected so E[price] == expected_price.
        let z: f64 = normal.sample(&mut rng);
        let sigma = config.noise_sigma;
        let price = config.expected_price(mileage) * (z - 0.5 * sigma * sigma).exp();

        let mileage_text = if is_new {
            "Neues Fahrzeug".to_string()
        } else {
            format_km(mileage)
        };
        out.push(RawListing::new(title, format_chf(price), mileage_text));
    }

    Ok(out)
}

/// `25900.4` -> `"CHF 25'900.–"`.
pub fn format_chf(price: f64) -> String {
    format!("CHF {}.–", group_thousands(price.round().max(0.0) as u64))
}

/// `119333.0` -> `"119'333 km"`.
pub fn format_km(mileage: f64) -> String {
    format!("{} km", group_thousands(mileage.round().max(0.0) as u64))
}

fn group_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\'');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::clean;

    #[test]
    fn formats_like_the_site() {
        assert_eq!(format_chf(25900.4), "CHF 25'900.–");
        assert_eq!(format_chf(950.0), "CHF 950.–");
        assert_eq!(format_km(119333.0), "119'333 km");
        assert_eq!(format_km(1234567.0), "1'234'567 km");
        assert_eq!(format_km(0.0), "0 km");
    }

    #[test]
    fn sample_is_deterministic_per_seed() {
        let config = SampleConfig::default();
        assert_eq!(generate_sample(&config).unwrap(), generate_sample(&config).unwrap());
        let other = SampleConfig { seed: 7, ..config.clone() };
        assert_ne!(generate_sample(&config).unwrap(), generate_sample(&other).unwrap());
    }

    #[test]
    fn sample_round_trips_through_cleaner() {
        let config = SampleConfig {
            count: 200,
            malformed_rate: 0.1,
            ..SampleConfig::default()
        };
        let raw = generate_sample(&config).unwrap();
        assert_eq!(raw.len(), 200);

        let dataset = clean(&raw);
        assert!(dataset.len() < 200, "malformed rows should be dropped");
        assert!(dataset.len() > 150);
        for l in &dataset {
            assert!(l.price > 0.0);
            assert!((0.0..=config.max_mileage).contains(&l.mileage));
        }
    }

    #[test]
    fn clean_sample_has_no_drops() {
        let config = SampleConfig {
            count: 123,
            malformed_rate: 0.0,
            ..SampleConfig::default()
        };
        assert_eq!(clean(&generate_sample(&config).unwrap()).len(), 123);
    }

    #[test]
    fn rejects_bad_probabilities() {
        let config = SampleConfig {
            malformed_rate: 0.8,
            new_vehicle_rate: 0.3,
            ..SampleConfig::default()
        };
        assert!(generate_sample(&config).is_err());
    }
}
