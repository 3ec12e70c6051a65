/// Busy flags that disable selection, sorting and pagination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyState {
    /// Caller is fetching data
    pub loading: bool,
    /// Caller is running some other mutation
    pub processing: bool,
    /// A bulk action started by the browser has not settled yet
    pub bulk_in_flight: bool,
}

impl BusyState {
    pub fn is_busy(&self) -> bool {
        self.loading || self.processing || self.bulk_in_flight
    }
}
