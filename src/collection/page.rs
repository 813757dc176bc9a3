/// `$skip`/`$top` window of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub top: usize,
}

impl PageRequest {
    pub fn for_page(page: usize, page_size: usize) -> Self {
        Self {
            skip: page * page_size,
            top: page_size,
        }
    }

    /// A short page means the server has nothing after it.
    pub fn is_last(&self, received: usize) -> bool {
        received < self.top
    }
}
