use std::collections::VecDeque;
use std::rc::Rc;

/// Bộ đệm dòng có giới hạn cho các bảng chạy liên tục.
///
/// Mỗi dòng nằm sau một `Rc`, nên sao chép cả bộ đệm chỉ tăng bộ đếm tham chiếu.
/// Khi đầy, dòng ở đầu đối diện với đầu vừa thêm bị bỏ.
#[derive(Debug, PartialEq)]
pub struct RowBuffer<T> {
    rows: VecDeque<Rc<T>>,
    capacity: usize,
}

impl<T> Clone for RowBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            capacity: self.capacity,
        }
    }
}

impl<T> RowBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Thêm vào cuối; bỏ dòng cũ nhất ở đầu nếu vượt giới hạn.
    pub fn push_back(&mut self, row: T) {
        self.rows.push_back(Rc::new(row));
        if self.rows.len() > self.capacity {
            self.rows.pop_front();
        }
    }

    /// Thêm vào đầu; bỏ dòng ở cuối nếu vượt giới hạn.
    pub fn push_front(&mut self, row: T) {
        self.rows.push_front(Rc::new(row));
        if self.rows.len() > self.capacity {
            self.rows.pop_back();
        }
    }

    /// Thay toàn bộ nội dung, chỉ giữ `capacity` dòng cuối.
    pub fn replace(&mut self, rows: impl IntoIterator<Item = T>) {
        self.rows.clear();
        for row in rows {
            self.push_back(row);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| row.as_ref())
    }

    /// Sửa dòng đầu tiên thoả `matches`; trả về `false` nếu không có.
    pub fn update(&mut self, matches: impl Fn(&T) -> bool, edit: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        match self.rows.iter_mut().find(|row| matches(&***row)) {
            Some(row) => {
                edit(Rc::make_mut(row));
                true
            }
            None => false,
        }
    }
}
