//! Outline builder: headings of a parsed document paired with their ids.
use log::warn;

use crate::{
  anchors::HeadingIds,
  parser::{NodeTree, nodes::plain_text},
  types::{HeadingRecord, Outline},
};

/// Build the outline of `tree`.
///
/// The `k`-th heading (in [`NodeTree::headings`] order) is paired with the
/// `k`-th entry of `ids`. A heading with no extractable text still yields a
/// record, with an empty title. Should `ids` be shorter than the heading
/// list, the surplus headings are left out and a warning is logged.
#[must_use]
pub fn build_outline(tree: &NodeTree, ids: &HeadingIds) -> Outline {
  let headings = tree.headings();
  if headings.len() != ids.len() {
    warn!(
      "Outline has {} headings but {} ids were supplied",
      headings.len(),
      ids.len()
    );
  }

  headings
    .iter()
    .zip(ids.as_slice())
    .map(|(heading, id)| {
      HeadingRecord {
        level: heading.level,
        title: plain_text(heading.content),
        id:    id.clone(),
      }
    })
    .collect()
}

/// Title of the document: the first level-1 heading, if any.
#[must_use]
pub fn document_title(outline: &[HeadingRecord]) -> Option<String> {
  outline
    .iter()
    .find(|record| record.level == 1 && !record.title.is_empty())
    .map(|record| record.title.clone())
}
