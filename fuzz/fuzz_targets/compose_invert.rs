#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use the_ot::{
  TextOp,
  apply,
  compose,
  invert,
  invert_with_doc,
};

use crate::common::{
  build_op,
  scenario_from_bytes,
};

fuzz_target!(|data: &[u8]| {
  let scenario = scenario_from_bytes(data);
  let doc = scenario.doc;
  let first = build_op(&doc, &scenario.left);
  let middle = apply(&doc, &first).expect("apply first");
  let second = build_op(&middle, &scenario.right);
  let last = apply(&middle, &second).expect("apply second");

  let composed = compose(&first, &second).expect("compose");
  assert!(composed.validate().is_ok());
  assert_eq!(apply(&doc, &composed).expect("apply composed"), last);

  let undo = invert_with_doc(&first, &doc).expect("invert first");
  assert_eq!(apply(&middle, &undo).expect("apply undo"), doc);

  // inverting the undo gets `first` back, with its deletes filled in
  let redo = invert(&undo).expect("invert undo");
  assert!(redo.is_invertible());
  assert_eq!(apply(&doc, &redo).expect("apply redo"), middle);

  let roundtrip = TextOp::from_value(&composed.to_value()).expect("decode");
  assert_eq!(roundtrip, composed);
});
