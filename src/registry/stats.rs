#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryMetrics {
    pub total_routes_registered: usize,
    pub replaced_routes: usize,
}

impl RegistryMetrics {
    pub fn record_insert(&mut self) {
        self.total_routes_registered += 1;
    }

    pub fn record_replace(&mut self) {
        self.replaced_routes += 1;
    }
}
