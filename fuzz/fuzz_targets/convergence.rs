#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use ropey::Rope;
use the_ot::{
  Side,
  apply,
  compose,
  transform,
  transform_position,
};

use crate::common::{
  build_op,
  scenario_from_bytes,
};

fuzz_target!(|data: &[u8]| {
  let scenario = scenario_from_bytes(data);
  let doc = Rope::from(scenario.doc.as_str());
  let left = build_op(&scenario.doc, &scenario.left);
  let right = build_op(&scenario.doc, &scenario.right);

  let left_over = transform(&left, &right, Side::Left).expect("transform left");
  let right_over = transform(&right, &left, Side::Right).expect("transform right");

  let after_right = apply(&doc, &right).expect("apply right");
  let after_left = apply(&doc, &left).expect("apply left");
  let one = apply(&after_right, &left_over).expect("apply transformed left");
  let other = apply(&after_left, &right_over).expect("apply transformed right");
  assert_eq!(one, other);

  let composed = compose(&right, &left_over).expect("compose");
  assert_eq!(apply(&doc, &composed).expect("apply composed"), one);

  let len = one.len_chars();
  for cursor in [0, doc.len_chars() / 2, doc.len_chars()] {
    assert!(transform_position(cursor, &right) <= after_right.len_chars());
    assert!(transform_position(transform_position(cursor, &right), &left_over) <= len);
  }
});
