use super::*;

fn pixel(rgba: [u8; 4]) -> RasterImage {
    RasterImage::from_rgba8(1, 1, rgba.to_vec()).unwrap()
}

#[test]
fn fresh_slot_is_empty_at_generation_zero() {
    let slot = ImageSlot::default();
    assert_eq!(slot.ticket().generation(), 0);
    assert!(slot.current().is_none());
}

#[test]
fn begin_invalidates_outstanding_tickets() {
    let mut slot = ImageSlot::default();
    let old = slot.ticket();
    let new = slot.begin();
    assert_ne!(old, new);
    assert_eq!(slot.offer(old, pixel([1, 2, 3, 255])), ImageOffer::Stale);
    assert!(slot.current().is_none());
    assert_eq!(slot.offer(new, pixel([1, 2, 3, 255])), ImageOffer::Applied);
    assert!(slot.current().is_some());
}

#[test]
fn begin_drops_the_loaded_image() {
    let mut slot = ImageSlot::default();
    let t = slot.ticket();
    slot.offer(t, pixel([9, 9, 9, 255]));
    slot.begin();
    assert!(slot.current().is_none());
}

#[test]
fn malformed_images_are_refused() {
    let mut slot = ImageSlot::default();
    let broken = RasterImage {
        width: 4,
        height: 4,
        rgba8: Arc::new(vec![0; 3]),
    };
    assert_eq!(slot.offer(slot.ticket(), broken), ImageOffer::Malformed);
    assert!(slot.current().is_none());
}

#[test]
fn current_shares_one_buffer() {
    let mut slot = ImageSlot::default();
    slot.offer(slot.ticket(), pixel([5, 5, 5, 255]));
    let a = slot.current().unwrap();
    let b = slot.current().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
