use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;

/// In-memory zip archive accumulating named payloads.
pub struct ArchiveBuilder {
	writer: ZipWriter<Cursor<Vec<u8>>>,
	names: HashSet<String>,
}

impl Default for ArchiveBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// `name` with `_<n>` inserted before the extension.
fn numbered(name: &str, n: usize) -> String {
	match name.rsplit_once('.') {
		Some((stem, ext)) => format!("{stem}_{n}.{ext}"),
		None => format!("{name}_{n}"),
	}
}

impl ArchiveBuilder {
	pub fn new() -> Self {
		Self {
			writer: ZipWriter::new(Cursor::new(Vec::new())),
			names: HashSet::new(),
		}
	}

	/// Add an entry, returning the name it was stored under. A name already in the archive
	/// gets a numeric suffix. Already-compressed payloads (images) should pass
	/// `deflate = false`.
	pub fn add(&mut self, name: &str, bytes: &[u8], deflate: bool) -> Result<String> {
		let mut unique = name.to_owned();
		let mut n = 1;
		while self.names.contains(&unique) {
			n += 1;
			unique = numbered(name, n);
		}

		let method = if deflate {
			CompressionMethod::Deflated
		} else {
			CompressionMethod::Stored
		};
		let options = SimpleFileOptions::default().compression_method(method);
		self.writer.start_file(unique.as_str(), options)?;
		self.writer.write_all(bytes)?;
		self.names.insert(unique.clone());
		Ok(unique)
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Write the central directory and return the archive bytes.
	pub fn finish(self) -> Result<Vec<u8>> {
		Ok(self.writer.finish()?.into_inner())
	}
}

#[cfg(test)]
mod tests {
	use std::io::Read;

	use zip::ZipArchive;

	use super::*;

	#[test]
	fn entries_read_back() {
		let mut archive = ArchiveBuilder::new();
		archive.add("a.jpg", &[0xff, 0xd8, 0xff], false).unwrap();
		archive.add("a_info.txt", b"Title: A", true).unwrap();
		assert_eq!(archive.len(), 2);

		let bytes = archive.finish().unwrap();
		let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
		assert_eq!(zip.len(), 2);
		let mut text = String::new();
		zip.by_name("a_info.txt").unwrap().read_to_string(&mut text).unwrap();
		assert_eq!(text, "Title: A");
	}

	#[test]
	fn duplicate_names_are_numbered() {
		let mut archive = ArchiveBuilder::new();
		assert_eq!(archive.add("x.txt", b"1", true).unwrap(), "x.txt");
		assert_eq!(archive.add("x.txt", b"2", true).unwrap(), "x_2.txt");
		assert_eq!(archive.add("x.txt", b"3", true).unwrap(), "x_3.txt");
		assert_eq!(archive.add("noext", b"4", true).unwrap(), "noext");
		assert_eq!(archive.add("noext", b"5", true).unwrap(), "noext_2");
	}

	#[test]
	fn empty_archive_is_still_valid() {
		let archive = ArchiveBuilder::new();
		assert!(archive.is_empty());
		let bytes = archive.finish().unwrap();
		assert_eq!(ZipArchive::new(Cursor::new(bytes)).unwrap().len(), 0);
	}
}
