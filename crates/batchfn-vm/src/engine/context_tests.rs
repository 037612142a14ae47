use std::borrow::Cow;

use super::*;

#[derive(Debug, PartialEq)]
struct Frame(f32);

#[derive(Debug, PartialEq)]
struct Positions(Vec<i32>);

#[test]
fn remap_variants() {
    assert_eq!(IndexRemap::Identity.local(7), Some(7));
    assert_eq!(IndexRemap::Constant(0).local(7), Some(0));

    let table = IndexRemap::Table(Cow::Owned(vec![Some(2), None]));
    assert_eq!(table.local(0), Some(2));
    assert_eq!(table.local(1), None);
    assert_eq!(table.local(5), None);
}

#[test]
fn find_first_returns_first_record_of_type() {
    let first = Frame(1.0);
    let second = Frame(2.0);
    let context = ContextBuilder::new()
        .owned_element_context(Positions(vec![4, 5]), IndexRemap::Identity)
        .element_context(&first, IndexRemap::Constant(0))
        .element_context(&second, IndexRemap::Constant(0))
        .build();

    let frame = context.find_first::<Frame>().unwrap();
    assert_eq!(frame.data(), &Frame(1.0));
    assert_eq!(frame.local(9), Some(0));

    let positions = context.find_first::<Positions>().unwrap();
    assert_eq!(positions.data().0, vec![4, 5]);
    assert_eq!(context.element_contexts().len(), 3);
}

#[test]
fn find_first_missing_type() {
    let context = ContextBuilder::new()
        .owned_element_context(Frame(0.0), IndexRemap::Identity)
        .build();
    assert!(context.find_first::<Positions>().is_none());
    assert!(Context::empty().find_first::<Frame>().is_none());
}
