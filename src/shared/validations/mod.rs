pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_limit_and_page() {
        assert_eq!(validate_pagination(None, None), (1, 20));
        assert_eq!(validate_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(validate_pagination(Some(4), Some(50)), (4, 50));
    }
}
