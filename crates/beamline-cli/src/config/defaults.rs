pub struct DefaultsConfig {
    pub reference_placement: String,
    pub length_key: String,
    pub max_iterations: usize,
    pub drift_epsilon: f64,
    pub drift_kind: String,
    pub expand: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            reference_placement: "entry".to_string(),
            length_key: "L".to_string(),
            max_iterations: 3,
            drift_epsilon: 1.0e-6,
            drift_kind: "DRIFT".to_string(),
            expand: true,
        }
    }
}
