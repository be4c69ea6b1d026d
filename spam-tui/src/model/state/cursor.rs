//! 列表光标

/// 有界列表中的光标位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn previous(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn next(&mut self, len: usize) {
        if self.0 + 1 < len {
            self.0 += 1;
        }
    }

    pub fn first(&mut self) {
        self.0 = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.0 = len.saturating_sub(1);
    }

    /// 列表变短后把光标拉回范围内
    pub fn clamp(&mut self, len: usize) {
        self.0 = self.0.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_within_bounds() {
        let mut cursor = Cursor::default();
        cursor.previous();
        assert_eq!(cursor.index(), 0);

        cursor.next(3);
        cursor.next(3);
        cursor.next(3);
        assert_eq!(cursor.index(), 2);

        cursor.clamp(1);
        assert_eq!(cursor.index(), 0);

        cursor.last(0);
        assert_eq!(cursor.index(), 0);
    }
}
