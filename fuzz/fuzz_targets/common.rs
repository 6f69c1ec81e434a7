use the_ot::{
  Deletion,
  TextOp,
};

const MAX_INITIAL_BYTES: usize = 4 * 1024;
const MAX_EDITS: usize = 32;
const MAX_INSERT_BYTES: usize = 64;

#[derive(Debug, Clone)]
pub struct EditOp {
  pub skip:      u16,
  pub delete:    u16,
  pub keep_text: bool,
  pub insert:    Vec<u8>,
}

pub struct Scenario {
  pub doc:   String,
  pub left:  Vec<EditOp>,
  pub right: Vec<EditOp>,
}

pub fn scenario_from_bytes(data: &[u8]) -> Scenario {
  let mut cursor = ByteCursor::new(data);
  let initial_len = cursor.next_usize(MAX_INITIAL_BYTES);
  let doc = lossy_text(cursor.next_bytes(initial_len));
  let left = decode_edits(&mut cursor);
  let right = decode_edits(&mut cursor);

  Scenario { doc, left, right }
}

/// Build an operation against `doc` from a list of edits. Each edit skips,
/// deletes and inserts relative to where the previous one stopped, clamped to
/// the document.
pub fn build_op(doc: &str, edits: &[EditOp]) -> TextOp {
  let chars: Vec<char> = doc.chars().collect();
  let mut op = TextOp::new();
  let mut pos = 0;

  for edit in edits {
    let remaining = chars.len() - pos;
    let skip = (edit.skip as usize) % (remaining + 1);
    op.skip(skip);
    pos += skip;

    let remaining = chars.len() - pos;
    let delete = (edit.delete as usize) % (remaining + 1);
    let deletion = if edit.keep_text {
      let text: String = chars[pos..pos + delete].iter().collect();
      Deletion::Text(text.as_str().into())
    } else {
      Deletion::Count(delete)
    };
    op.delete(deletion);
    pos += delete;

    op.insert(lossy_text(&edit.insert).as_str().into());
  }

  op.normalize()
}

fn decode_edits(cursor: &mut ByteCursor<'_>) -> Vec<EditOp> {
  let count = cursor.next_usize(MAX_EDITS);
  let mut edits = Vec::with_capacity(count);
  for _ in 0..count {
    let skip = cursor.next_u16();
    let delete = cursor.next_u16();
    let keep_text = cursor.next_u8() & 1 == 1;
    let insert_len = cursor.next_usize(MAX_INSERT_BYTES);
    let insert = cursor.next_bytes(insert_len).to_vec();
    edits.push(EditOp {
      skip,
      delete,
      keep_text,
      insert,
    });
  }
  edits
}

fn lossy_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes).into_owned()
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8() as u16;
    let hi = self.next_u8() as u16;
    lo | (hi << 8)
  }

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u16() as usize) % (max + 1)
  }

  fn next_bytes(&mut self, len: usize) -> &'a [u8] {
    let start = self.pos.min(self.data.len());
    let end = start.saturating_add(len).min(self.data.len());
    self.pos = end;
    &self.data[start..end]
  }
}
