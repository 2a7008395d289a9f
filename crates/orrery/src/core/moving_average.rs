/// Fixed-capacity ring buffer averaging the most recent samples.
///
/// Used to smooth per-frame mean-motion estimates, which jitter when a
/// single finite difference spans a large warped time step.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    samples: Vec<f64>,
    capacity: usize,
    /// Next write slot once the buffer is full.
    head: usize,
}

impl MovingAverage {
    /// Create an empty window. A capacity of 0 is bumped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Add a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.head] = sample;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Mean of the stored samples, or 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }
}
