/// Where the user is along the main route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteProgress {
    pub leg_index: usize,
    pub step_index: usize,
    /// Index of the next intersection within the current step.
    pub intersection_index: usize,
    /// Share of the whole route already travelled, `0..=1`.
    pub fraction_traveled: f64,
}

impl RouteProgress {
    pub fn new(leg_index: usize, step_index: usize) -> Self {
        Self {
            leg_index,
            step_index,
            ..Self::default()
        }
    }

    pub fn with_fraction_traveled(mut self, fraction_traveled: f64) -> Self {
        self.fraction_traveled = fraction_traveled.clamp(0.0, 1.0);
        self
    }

    pub fn with_intersection_index(mut self, intersection_index: usize) -> Self {
        self.intersection_index = intersection_index;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.fraction_traveled >= 1.0
    }
}
