//! Seeded marker coordinates shared by the cluster bench and tests.

/// xorshift64 generator: a given seed yields the same points everywhere.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }

    /// A `(lat, lng)` pair inside the given box.
    pub fn gen_point(&mut self, lat: (f64, f64), lng: (f64, f64)) -> (f64, f64) {
        let lat = self.gen_f64(lat.0, lat.1);
        let lng = self.gen_f64(lng.0, lng.1);
        (lat, lng)
    }
}
