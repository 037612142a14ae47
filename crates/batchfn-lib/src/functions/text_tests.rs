use batchfn_core::IndexMask;
use batchfn_vm::{Context, MultiFunction, ParamsBuilder, execute};

use super::*;

#[test]
fn text_length_counts_bytes() {
    let function = TextLength::new();
    let texts = vec![String::new(), "abc".to_string(), "héllo".to_string()];
    let mut lengths = vec![-1_i32; 3];

    let mut builder = ParamsBuilder::new(function.signature(), 3);
    builder
        .add_single_input_vec(&texts)
        .add_single_output_vec(&mut lengths);
    let mut params = builder.build();
    execute(&function, &IndexMask::range(3), &mut params, &Context::empty());
    drop(params);

    assert_eq!(lengths, vec![0, 3, 6]);
}
