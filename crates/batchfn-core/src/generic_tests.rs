use super::*;
use crate::math::Vec3;

#[test]
fn generic_array_roundtrips_typed_values() {
    let mut array = GenericArray::new(TypeDesc::of::<i32>(), 3);
    array.typed_mut::<i32>()[1] = 5;
    assert_eq!(array.typed::<i32>(), &[0, 5, 0]);
    assert_eq!(array.into_vec::<i32>(), vec![0, 5, 0]);
}

#[test]
fn virtual_list_single_broadcasts_erased_value() {
    let value = Vec3::new(1.0, 2.0, 3.0);
    let list = GenericVirtualList::single_typed(&value, 4);
    assert!(list.is_single());
    assert_eq!(list.len(), 4);
    assert_eq!(list.get(3).downcast_ref::<Vec3>(), Some(&value));
    assert_eq!(list.typed::<Vec3>().to_vec(), vec![value; 4]);
}

#[test]
#[should_panic(expected = "broadcast value is not a `float`")]
fn virtual_list_single_checks_type() {
    let value = 1_i32;
    GenericVirtualList::single(TypeDesc::of::<f32>(), &value, 1);
}

#[test]
fn repeated_element_and_sublist() {
    let values = vec![10_i32, 20, 30];
    let list = GenericVirtualList::from_vec(&values);
    assert_eq!(list.repeated_element(1, 3).typed::<i32>().to_vec(), vec![20, 20, 20]);

    let lists = GenericVectorArray::from_lists::<i32>(vec![vec![1, 2], vec![3]]);
    let view = lists.as_virtual_list_list();
    assert_eq!(view.list_len(0), 2);
    assert_eq!(view.repeated_sublist(0, 5).typed::<i32>().to_vec(), vec![1, 2, 1, 2, 1]);
    assert_eq!(view.repeated_sublist(1, 2).typed::<i32>().to_vec(), vec![3, 3]);
}

#[test]
#[should_panic(expected = "cannot repeat the empty list at index 0 to length 2")]
fn repeated_sublist_of_empty_list_panics() {
    let lists = GenericVectorArray::from_lists::<i32>(vec![vec![]]);
    lists.as_virtual_list_list().repeated_sublist(0, 2);
}

#[test]
fn single_list_broadcasts_to_every_index() {
    let list = vec![1.5_f32, 2.5];
    let view = GenericVirtualListList::single_list(&list, 3);
    assert_eq!(view.len(), 3);
    assert_eq!(view.list_len(2), 2);
    assert_eq!(view.typed::<f32>().get(1).to_vec(), vec![1.5, 2.5]);
}

#[test]
fn vector_array_append_and_extend() {
    let mut lists = GenericVectorArray::new(TypeDesc::of::<String>(), 2);
    lists.append(0, &"a".to_string());
    let more = vec!["b".to_string(), "c".to_string()];
    lists.extend_copy(1, GenericVirtualList::from_vec(&more));
    lists.typed_mut::<String>().append(1, "d".to_string());

    assert_eq!(
        lists.into_lists::<String>(),
        vec![vec!["a".to_string()], vec!["b".into(), "c".into(), "d".into()]]
    );
}

#[test]
fn allocate_seals_the_index() {
    let mut lists = GenericVectorArray::new(TypeDesc::of::<f32>(), 2);
    {
        let mut slots = lists.allocate(1, 3);
        slots.copy_in(2, &7.0_f32);
    }
    assert!(lists.is_sealed(1));
    assert!(!lists.is_sealed(0));
    assert_eq!(lists.typed::<f32>(), &[Vec::<f32>::new(), vec![0.0, 0.0, 7.0]]);
}

#[test]
#[should_panic(expected = "list at index 0 was allocated with a fixed size and cannot grow")]
fn append_after_allocate_panics() {
    let mut lists = GenericVectorArray::new(TypeDesc::of::<f32>(), 1);
    lists.allocate(0, 1);
    lists.append(0, &1.0_f32);
}

#[test]
#[should_panic(expected = "already holds 1 values")]
fn allocate_non_empty_list_panics() {
    let mut lists = GenericVectorArray::from_lists::<f32>(vec![vec![1.0]]);
    lists.allocate(0, 2);
}

#[test]
#[should_panic(expected = "type mismatch: list array holds `float`, accessed as `int`")]
fn typed_access_checks_type() {
    let lists = GenericVectorArray::new(TypeDesc::of::<f32>(), 1);
    lists.typed::<i32>();
}

#[test]
fn mutable_array_writes_through() {
    let mut values = vec![1_i32, 2, 3];
    let mut array = GenericMutableArray::from_vec(&mut values);
    array.copy_in(0, &9_i32);
    array.construct_default(2);
    assert_eq!(array.into_typed::<i32>(), &[9, 2, 0]);
}

#[test]
fn to_array_materializes_view() {
    let value = true;
    let array = GenericVirtualList::single_typed(&value, 2).to_array();
    assert_eq!(array.typed::<bool>(), &[true, true]);
}
