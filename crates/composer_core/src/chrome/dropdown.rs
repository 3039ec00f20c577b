/// Open/closed state of the profile menu in the top bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileDropdown {
    open: bool,
}

impl ProfileDropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn on_click_outside(&mut self) {
        self.close();
    }

    pub fn on_escape(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::ProfileDropdown;

    #[test]
    fn toggle_then_outside_click_closes() {
        let mut dropdown = ProfileDropdown::default();
        dropdown.toggle();
        assert!(dropdown.is_open());
        dropdown.on_click_outside();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn escape_closes_and_is_idempotent() {
        let mut dropdown = ProfileDropdown::default();
        dropdown.on_escape();
        assert!(!dropdown.is_open());
        dropdown.toggle();
        dropdown.on_escape();
        assert!(!dropdown.is_open());
        dropdown.toggle();
        dropdown.toggle();
        assert!(!dropdown.is_open());
    }
}
