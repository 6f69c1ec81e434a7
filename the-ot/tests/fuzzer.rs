//! Randomized checks of the algebraic laws operations obey.
//!
//! Operations are generated against a concrete document the way an editor
//! would produce them: short skips followed by a word inserted or a few
//! characters deleted, with the occasional astral-plane emoji to keep the
//! codepoint arithmetic honest.

use quickcheck::{
  Arbitrary,
  Gen,
  quickcheck,
};
use ropey::Rope;
use the_ot::{
  Component,
  Deletion,
  Edit,
  Side,
  Snapshot,
  TextOp,
  apply,
  compose,
  invert,
  invert_with_doc,
  make_invertible,
  transform,
  transform_position,
};
use the_ot_core::unicode::char_to_byte_idx;

const WORDS: &[&str] = &[
  "hello", "world", "the", "quick", "brown", "fox", "rope", "text", "op", "a",
];
const EMOJI: &[&str] = &["😅", "🤖", "👻", "🤟", "💃"];

/// Uniform in `0..n`, or 0 when `n` is 0.
fn random_int(g: &mut Gen, n: usize) -> usize {
  if n == 0 {
    return 0;
  }
  usize::arbitrary(g) % n
}

fn random_word(g: &mut Gen) -> &'static str {
  WORDS[random_int(g, WORDS.len())]
}

fn gen_doc(g: &mut Gen) -> String {
  let mut doc = String::new();
  for _ in 0..random_int(g, 12) {
    if random_int(g, 5) == 0 {
      doc.push_str(EMOJI[random_int(g, EMOJI.len())]);
    } else {
      doc.push_str(random_word(g));
      doc.push(' ');
    }
  }
  doc
}

/// Walks a document emitting an operation along with the document it
/// produces.
struct OpGen {
  doc:      Vec<char>,
  pos:      usize,
  op:       TextOp,
  expected: String,
}

impl OpGen {
  fn remaining(&self) -> usize {
    self.doc.len() - self.pos
  }

  fn consume(&mut self, n: usize) {
    self.expected.extend(&self.doc[self.pos..self.pos + n]);
    self.op.skip(n);
    self.pos += n;
  }

  fn add_insert(&mut self, g: &mut Gen) {
    let skip = random_int(g, self.remaining().min(5));
    self.consume(skip);

    let word = if random_int(g, 5) != 0 {
      format!("{} ", random_word(g))
    } else {
      EMOJI[random_int(g, EMOJI.len())].to_string()
    };
    self.expected.push_str(&word);
    self.op.insert(word.as_str().into());
  }

  fn add_delete(&mut self, g: &mut Gen) {
    let skip = random_int(g, self.remaining().min(5));
    self.consume(skip);

    let len = random_int(g, self.remaining().min(10));
    let deletion = if bool::arbitrary(g) {
      Deletion::Count(len)
    } else {
      let text: String = self.doc[self.pos..self.pos + len].iter().collect();
      Deletion::Text(text.as_str().into())
    };
    self.op.delete(deletion);
    self.pos += len;
  }
}

fn gen_op(g: &mut Gen, doc: &str) -> (TextOp, String) {
  let mut state = OpGen {
    doc:      doc.chars().collect(),
    pos:      0,
    op:       TextOp::new(),
    expected: String::new(),
  };
  // long documents lean towards deletes
  let chance = if state.doc.len() > 30 { 3 } else { 2 };

  while state.remaining() > 0 {
    match random_int(g, chance) {
      0 => state.add_insert(g),
      _ => state.add_delete(g),
    }
    if random_int(g, 7) == 0 {
      break;
    }
  }

  // the loop never inserts at the very end
  if random_int(g, if state.remaining() == 0 { 2 } else { 10 }) == 0 {
    state.add_insert(g);
  }

  let rest: String = state.doc[state.pos..].iter().collect();
  state.expected.push_str(&rest);
  (state.op.normalize(), state.expected)
}

/// One operation on a document.
#[derive(Debug, Clone)]
struct Single {
  doc:      String,
  op:       TextOp,
  expected: String,
}

impl Arbitrary for Single {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = gen_doc(g);
    let (op, expected) = gen_op(g, &doc);
    Self { doc, op, expected }
  }
}

/// Two operations made one after the other.
#[derive(Debug, Clone)]
struct Sequential {
  doc:    String,
  first:  TextOp,
  second: TextOp,
  result: String,
}

impl Arbitrary for Sequential {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = gen_doc(g);
    let (first, middle) = gen_op(g, &doc);
    let (second, result) = gen_op(g, &middle);
    Self {
      doc,
      first,
      second,
      result,
    }
  }
}

/// Two operations made concurrently against the same document.
#[derive(Debug, Clone)]
struct Concurrent {
  doc:   String,
  left:  TextOp,
  right: TextOp,
}

impl Arbitrary for Concurrent {
  fn arbitrary(g: &mut Gen) -> Self {
    let doc = gen_doc(g);
    let (left, _) = gen_op(g, &doc);
    let (right, _) = gen_op(g, &doc);
    Self { doc, left, right }
  }
}

/// A cursor and an edit placed relative to it: `at` lies anywhere from the
/// start of the document to a little past the cursor.
#[derive(Debug, Clone)]
struct CursorEdit {
  cursor: usize,
  at:     usize,
  len:    usize,
  word:   &'static str,
}

impl Arbitrary for CursorEdit {
  fn arbitrary(g: &mut Gen) -> Self {
    let cursor = random_int(g, 200);
    let word = if random_int(g, 5) == 0 {
      EMOJI[random_int(g, EMOJI.len())]
    } else {
      random_word(g)
    };
    Self {
      cursor,
      at: random_int(g, cursor + 10),
      len: 1 + random_int(g, 20),
      word,
    }
  }
}

/// A list of components that may break every normalization rule.
#[derive(Debug, Clone)]
struct RawOp(TextOp);

impl Arbitrary for RawOp {
  fn arbitrary(g: &mut Gen) -> Self {
    let len = random_int(g, 12);
    let components = (0..len)
      .map(|_| {
        match random_int(g, 4) {
          0 => Component::Skip(random_int(g, 4)),
          1 => {
            let text = if random_int(g, 4) == 0 { "" } else { random_word(g) };
            Component::Insert(text.into())
          },
          2 => Component::Delete(Deletion::Count(random_int(g, 4))),
          _ => Component::Delete(Deletion::Text(EMOJI[random_int(g, EMOJI.len())].into())),
        }
      })
      .collect();
    RawOp(TextOp::from_components(components))
  }
}

fn replay_edits(doc: &str, op: &TextOp) -> String {
  let mut doc = doc.to_string();
  for edit in op.edits() {
    match edit {
      Edit::Insert { pos, text } => doc.insert_str(char_to_byte_idx(&doc, pos), &text),
      Edit::Remove { pos, len } => {
        let start = char_to_byte_idx(&doc, pos);
        let end = char_to_byte_idx(&doc, pos + len);
        doc.replace_range(start..end, "");
      },
    }
  }
  doc
}

fn apply_both(doc: &str, op: &TextOp) -> Option<String> {
  let string = apply(&doc.to_string(), op).ok()?;
  let rope = apply(&Rope::from(doc), op).ok()?;
  (rope == string.as_str()).then_some(string)
}

quickcheck! {
  fn generated_ops_are_valid(s: Single) -> bool {
    s.op.validate().is_ok() && apply_both(&s.doc, &s.op).as_deref() == Some(s.expected.as_str())
  }

  fn normalize_is_idempotent(raw: RawOp) -> bool {
    let once = raw.0.normalize();
    once.validate().is_ok() && once.clone().normalize() == once
  }

  fn compose_matches_sequential_apply(s: Sequential) -> bool {
    let Ok(composed) = compose(&s.first, &s.second) else {
      return false;
    };
    composed.validate().is_ok()
      && apply_both(&s.doc, &composed).as_deref() == Some(s.result.as_str())
  }

  fn transform_converges(c: Concurrent) -> bool {
    let (Ok(left), Ok(right)) = (
      transform(&c.left, &c.right, Side::Left),
      transform(&c.right, &c.left, Side::Right),
    ) else {
      return false;
    };

    let Some(after_right) = apply_both(&c.doc, &c.right) else {
      return false;
    };
    let Some(after_left) = apply_both(&c.doc, &c.left) else {
      return false;
    };
    let one = apply_both(&after_right, &left);
    let other = apply_both(&after_left, &right);
    one.is_some() && one == other
  }

  fn transform_then_compose_agree(c: Concurrent) -> bool {
    let (Ok(left), Ok(right)) = (
      transform(&c.left, &c.right, Side::Left),
      transform(&c.right, &c.left, Side::Right),
    ) else {
      return false;
    };
    let (Ok(one), Ok(other)) = (compose(&c.right, &left), compose(&c.left, &right)) else {
      return false;
    };
    apply_both(&c.doc, &one) == apply_both(&c.doc, &other)
  }

  fn invert_undoes(s: Single) -> bool {
    let Ok(undo) = invert_with_doc(&s.op, &s.doc) else {
      return false;
    };
    let Ok(invertible) = make_invertible(&s.op, &Rope::from(s.doc.as_str())) else {
      return false;
    };
    invertible.is_invertible()
      && invert(&invertible) == Ok(undo.clone())
      && apply_both(&s.expected, &undo).as_deref() == Some(s.doc.as_str())
  }

  fn edits_replay_like_apply(s: Single) -> bool {
    replay_edits(&s.doc, &s.op) == s.expected
  }

  fn positions_stay_in_bounds(s: Single, cursor: usize) -> bool {
    let len = s.doc.chars().count();
    let cursor = cursor % (len + 1);
    transform_position(cursor, &s.op) <= s.expected.chars().count()
  }

  fn inserts_never_pull_cursors_back(e: CursorEdit) -> bool {
    let mapped = transform_position(e.cursor, &TextOp::insert_at(e.at, e.word));
    let expected = if e.at < e.cursor {
      e.cursor + e.word.chars().count()
    } else {
      e.cursor
    };
    mapped >= e.cursor && mapped == expected
  }

  fn deletes_collapse_covered_cursors(e: CursorEdit) -> bool {
    let mapped = transform_position(e.cursor, &TextOp::remove_at(e.at, Deletion::Count(e.len)));
    let expected = if e.cursor <= e.at {
      e.cursor
    } else if e.cursor <= e.at + e.len {
      e.at
    } else {
      e.cursor - e.len
    };
    mapped <= e.cursor && mapped == expected
  }
}

#[test]
fn editing_through_helpers() {
  let mut g = Gen::new(20);
  let mut doc = String::new();
  let mut expected = String::new();

  for _ in 0..500 {
    let len = doc.chars().count();
    let op = if len == 0 || bool::arbitrary(&mut g) {
      let pos = random_int(&mut g, len + 1);
      let word = format!("{} ", random_word(&mut g));
      let at = char_to_byte_idx(&expected, pos);
      expected.insert_str(at, &word);
      TextOp::insert_at(pos, &word)
    } else {
      let pos = random_int(&mut g, len);
      let n = random_int(&mut g, 4).min(len - pos);
      let (start, end) = (
        char_to_byte_idx(&expected, pos),
        char_to_byte_idx(&expected, pos + n),
      );
      expected.replace_range(start..end, "");
      TextOp::remove_at(pos, Deletion::Count(n))
    };

    doc = apply(&doc, &op).unwrap();
    assert_eq!(doc, expected);
    assert_eq!(doc.len_chars(), expected.chars().count());
  }
}
