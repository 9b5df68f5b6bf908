use laporte_core::RowBuffer;

fn contents(buffer: &RowBuffer<u32>) -> Vec<u32> {
    buffer.iter().copied().collect()
}

#[test]
fn appending_past_capacity_drops_the_oldest_rows() {
    let mut buffer = RowBuffer::new(3);
    for row in 1..=5 {
        buffer.push_back(row);
    }

    assert_eq!(buffer.len(), 3);
    assert_eq!(contents(&buffer), [3, 4, 5]);
}

#[test]
fn prepending_past_capacity_drops_from_the_tail() {
    let mut buffer = RowBuffer::new(2);
    for row in 1..=4 {
        buffer.push_front(row);
    }

    assert_eq!(contents(&buffer), [4, 3]);
}

#[test]
fn replacing_keeps_only_the_newest_history() {
    let mut buffer = RowBuffer::new(2048);
    buffer.push_back(99);
    buffer.replace(0..5000);

    assert_eq!(buffer.len(), 2048);
    assert_eq!(buffer.iter().next(), Some(&2952));
    assert_eq!(buffer.iter().last(), Some(&4999));
}

#[test]
fn clones_share_rows_until_one_is_edited() {
    let mut original = RowBuffer::new(4);
    original.replace([1, 2, 3]);
    let mut edited = original.clone();

    assert!(edited.update(|row| *row == 2, |row| *row = 20));
    assert!(!edited.update(|row| *row == 7, |row| *row = 70));

    assert_eq!(contents(&original), [1, 2, 3]);
    assert_eq!(contents(&edited), [1, 20, 3]);
}

#[test]
fn zero_capacity_still_holds_one_row() {
    let mut buffer = RowBuffer::new(0);
    buffer.push_back(1);
    buffer.push_back(2);

    assert_eq!(buffer.capacity(), 1);
    assert_eq!(contents(&buffer), [2]);
}
