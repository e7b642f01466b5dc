//! Document and collection paths
//!
//! Paths alternate collection and document segments:
//! `toko` is a collection, `toko/{uid}` a document,
//! `toko/{uid}/transaksi` a collection, and so on.

use crate::error::PathError;
use std::fmt;

fn segments(raw: &str) -> Result<Vec<&str>, PathError> {
	let trimmed = raw.trim_matches('/');
	if trimmed.is_empty() {
		return Err(PathError::Empty);
	}
	let segments: Vec<&str> = trimmed.split('/').collect();
	if segments.iter().any(|s| s.trim().is_empty()) {
		return Err(PathError::EmptySegment(raw.to_string()));
	}
	Ok(segments)
}

/// A single segment appended to an existing path.
fn segment(name: &str) -> Result<&str, PathError> {
	if name.trim().is_empty() {
		return Err(PathError::EmptySegment(name.to_string()));
	}
	if name.contains('/') {
		return Err(PathError::NestedSegment(name.to_string()));
	}
	Ok(name)
}

/// Path to a single document.
///
/// # Examples
///
/// ```
/// use toko_backend::DocumentPath;
///
/// let path = DocumentPath::parse("toko/uid-1").unwrap();
/// assert_eq!(path.id(), "uid-1");
/// assert_eq!(path.parent().as_str(), "toko");
/// assert!(DocumentPath::parse("toko").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
	pub fn parse(raw: &str) -> Result<Self, PathError> {
		let segments = segments(raw)?;
		if segments.len() % 2 != 0 {
			return Err(PathError::NotADocument(raw.to_string()));
		}
		Ok(Self(segments.join("/")))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Last segment.
	pub fn id(&self) -> &str {
		self.0.rsplit('/').next().unwrap_or_default()
	}

	/// Collection that holds this document.
	pub fn parent(&self) -> CollectionPath {
		let parent = self
			.0
			.rsplit_once('/')
			.map(|(parent, _)| parent)
			.unwrap_or_default();
		CollectionPath(parent.to_string())
	}

	/// Sub-collection `name` under this document.
	pub fn collection(&self, name: &str) -> Result<CollectionPath, PathError> {
		CollectionPath::parse(&format!("{}/{}", self.0, segment(name)?))
	}
}

impl fmt::Display for DocumentPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Path to an ordered collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
	pub fn parse(raw: &str) -> Result<Self, PathError> {
		let segments = segments(raw)?;
		if segments.len() % 2 == 0 {
			return Err(PathError::NotACollection(raw.to_string()));
		}
		Ok(Self(segments.join("/")))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Document `id` inside this collection. `id` is a single segment.
	pub fn doc(&self, id: &str) -> Result<DocumentPath, PathError> {
		DocumentPath::parse(&format!("{}/{}", self.0, segment(id)?))
	}
}

impl fmt::Display for CollectionPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
