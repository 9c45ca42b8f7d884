//! File management: listing, transfer, metadata, batch jobs, conversions, and exports.
//!
//! Remote paths are passed through verbatim as `filename` or `dirname` query parameters.

// crates.io
use serde_json::json;
// self
use crate::{_prelude::*, http::ApiHttpClient, resources::def_facade};

/// Marketplace a file can be exported to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportTarget {
	/// Amazon.
	Amazon,
	/// Grainger.
	Grainger,
	/// Walmart.
	Walmart,
	/// The Home Depot.
	HomeDepot,
	/// Lowe's.
	Lowes,
}
impl ExportTarget {
	/// Every export target.
	pub const ALL: [ExportTarget; 5] =
		[Self::Amazon, Self::Grainger, Self::Walmart, Self::HomeDepot, Self::Lowes];

	/// Endpoint path of the export.
	pub const fn path(self) -> &'static str {
		match self {
			Self::Amazon => "/v2/files/export/amazon",
			Self::Grainger => "/v2/files/export/grainger",
			Self::Walmart => "/v2/files/export/walmart",
			Self::HomeDepot => "/v2/files/export/homedepot",
			Self::Lowes => "/v2/files/export/lowes",
		}
	}
}

def_facade!(Files, "File and folder operations.");
impl<C> Files<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists the contents of `dirname`.
	pub async fn list(&self, dirname: &str) -> Result<Value> {
		self.transport.get("/v2/files/readdir", &[("dirname", dirname)]).await
	}

	/// File metadata (size, dates, content type).
	pub async fn info(&self, filename: &str) -> Result<Value> {
		self.transport.get("/v2/files/stat", &[("filename", filename)]).await
	}

	/// Uploads a local file to `remote_path`.
	///
	/// Fails with [`crate::error::ValidationError::FileNotFound`] before any network call when
	/// `local_path` does not exist.
	pub async fn upload(&self, local_path: impl AsRef<Path>, remote_path: &str) -> Result<Value> {
		self.transport.upload("/v2/files/upload", local_path, &[("filename", remote_path)]).await
	}

	/// Uploads in-memory bytes to `remote_path`.
	pub async fn upload_content(
		&self,
		bytes: impl Into<Vec<u8>>,
		remote_path: &str,
		content_type: &str,
	) -> Result<Value> {
		self.transport
			.upload_content("/v2/files/upload", bytes, content_type, &[("filename", remote_path)])
			.await
	}

	/// Downloads a file's raw bytes.
	pub async fn download(&self, filename: &str) -> Result<Vec<u8>> {
		self.transport.download("/v2/files/download", &[("filename", filename)]).await
	}

	/// Deletes a file or an empty folder.
	pub async fn delete(&self, filename: &str) -> Result<Value> {
		self.transport.delete("/v2/files/delete", &[("filename", filename)]).await
	}

	/// Copies `from` to `to`.
	pub async fn copy(&self, from: &str, to: &str) -> Result<Value> {
		self.transport.post("/v2/files/copy", json!({ "from": from, "to": to }), &[]).await
	}

	/// Renames or moves `from` to `to`.
	pub async fn rename(&self, from: &str, to: &str) -> Result<Value> {
		self.transport.post("/v2/files/rename", json!({ "from": from, "to": to }), &[]).await
	}

	/// Creates a folder.
	pub async fn mkdir(&self, dirname: &str) -> Result<Value> {
		self.transport.post("/v2/files/mkdir", json!({}), &[("dirname", dirname)]).await
	}

	/// Fetches a remote URL into `filename`.
	///
	/// Keys of an object-valued `options` (for example `wait`) are merged over `url`.
	pub async fn fetch(&self, url: &str, filename: &str, options: Option<Value>) -> Result<Value> {
		let mut body = Map::new();

		body.insert("url".into(), Value::from(url));

		if let Some(Value::Object(options)) = options {
			body.extend(options);
		}

		self.transport.post("/v2/files/fetch", Value::Object(body), &[("filename", filename)]).await
	}

	/// Searches files with `query`, `from`, `size`, `sort`, and related parameters.
	pub async fn search(&self, params: Value) -> Result<Value> {
		self.transport.post("/v2/files/search", params, &[]).await
	}

	/// Continues a search started with a `scroll` parameter.
	pub async fn search_scroll(&self, scroll_id: &str) -> Result<Value> {
		self.transport.post("/v2/files/search/scroll", json!({ "scrollId": scroll_id }), &[]).await
	}

	/// All metadata of a file.
	pub async fn meta(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta", filename).await
	}

	/// Replaces metadata of a file.
	pub async fn set_meta(&self, filename: &str, meta: Value) -> Result<Value> {
		self.set_meta_field("/v2/files/meta", filename, meta).await
	}

	/// Approval flag of a file.
	pub async fn approval(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta/approval", filename).await
	}

	/// Sets the approval flag of a file.
	pub async fn set_approval(&self, filename: &str, approved: bool) -> Result<Value> {
		self.set_meta_field("/v2/files/meta/approval", filename, json!({ "approved": approved }))
			.await
	}

	/// Description of a file.
	pub async fn description(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta/description", filename).await
	}

	/// Sets the description of a file.
	pub async fn set_description(&self, filename: &str, description: &str) -> Result<Value> {
		self.set_meta_field(
			"/v2/files/meta/description",
			filename,
			json!({ "description": description }),
		)
		.await
	}

	/// Title of a file.
	pub async fn title(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta/title", filename).await
	}

	/// Sets the title of a file.
	pub async fn set_title(&self, filename: &str, title: &str) -> Result<Value> {
		self.set_meta_field("/v2/files/meta/title", filename, json!({ "title": title })).await
	}

	/// Product metadata of a file.
	pub async fn product(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta/product", filename).await
	}

	/// Sets product metadata of a file.
	pub async fn set_product(&self, filename: &str, product: Value) -> Result<Value> {
		self.set_meta_field("/v2/files/meta/product", filename, product).await
	}

	/// Tags of a file.
	pub async fn tags(&self, filename: &str) -> Result<Value> {
		self.get_meta("/v2/files/meta/tags", filename).await
	}

	/// Adds tags to a file.
	pub async fn set_tags<S>(&self, filename: &str, tags: &[S]) -> Result<Value>
	where
		S: AsRef<str>,
	{
		let tags = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>();

		self.set_meta_field("/v2/files/meta/tags", filename, json!({ "tags": tags })).await
	}

	/// Removes every tag of a file.
	pub async fn delete_tags(&self, filename: &str) -> Result<Value> {
		self.transport.delete("/v2/files/meta/tags", &[("filename", filename)]).await
	}

	/// Starts an asynchronous zip job; poll it with [`Files::zip_result`].
	pub async fn zip<S>(&self, filenames: &[S], zip_filename: Option<&str>) -> Result<Value>
	where
		S: AsRef<str>,
	{
		let filenames = filenames.iter().map(AsRef::as_ref).collect::<Vec<_>>();
		let mut body = json!({ "filenames": filenames });

		if let (Some(zip_filename), Some(body)) = (zip_filename, body.as_object_mut()) {
			body.insert("zipFilename".into(), Value::from(zip_filename));
		}

		self.transport.post("/v2/files/zip", body, &[]).await
	}

	/// Progress of a zip job.
	pub async fn zip_result(&self, token: &str) -> Result<Value> {
		self.transport.get("/v2/files/zip/result", &[("token", token)]).await
	}

	/// Starts an asynchronous batch delete; poll it with [`Files::delete_batch_result`].
	pub async fn delete_batch<S>(&self, filenames: &[S]) -> Result<Value>
	where
		S: AsRef<str>,
	{
		let filenames = filenames.iter().map(AsRef::as_ref).collect::<Vec<_>>();

		self.transport.post("/v2/files/delete/batch", json!({ "filenames": filenames }), &[]).await
	}

	/// Progress of a batch delete.
	pub async fn delete_batch_result(&self, token: &str) -> Result<Value> {
		self.transport.get("/v2/files/delete/batch/result", &[("token", token)]).await
	}

	/// Converts a spin to a video.
	pub async fn spin_to_video(&self, filename: &str, options: Option<Value>) -> Result<Value> {
		self.post_options("/v2/files/spin2video", filename, options).await
	}

	/// Converts a video to a spin.
	pub async fn video_to_spin(&self, filename: &str, options: Option<Value>) -> Result<Value> {
		self.post_options("/v2/files/video2spin", filename, options).await
	}

	/// Exports a file to a marketplace.
	pub async fn export(
		&self,
		target: ExportTarget,
		filename: &str,
		options: Option<Value>,
	) -> Result<Value> {
		self.post_options(target.path(), filename, options).await
	}

	/// Options of a folder.
	pub async fn folder_options(&self, dirname: &str) -> Result<Value> {
		self.transport.get("/v2/files/folder/options", &[("dirname", dirname)]).await
	}

	/// Sets options of a folder.
	pub async fn set_folder_options(&self, dirname: &str, options: Value) -> Result<Value> {
		self.transport.post("/v2/files/folder/options", options, &[("dirname", dirname)]).await
	}

	/// Point of interest of an image.
	pub async fn poi(&self, filename: &str) -> Result<Value> {
		self.transport.get("/v2/files/poi", &[("filename", filename)]).await
	}

	/// Sets the point of interest of an image.
	pub async fn set_poi(&self, filename: &str, poi: Value) -> Result<Value> {
		self.transport.post("/v2/files/poi", poi, &[("filename", filename)]).await
	}

	/// Removes the point of interest of an image.
	pub async fn delete_poi(&self, filename: &str) -> Result<Value> {
		self.transport.delete("/v2/files/poi", &[("filename", filename)]).await
	}

	/// Signed URL for a protected file, optionally valid for `expiry` seconds.
	pub async fn jwt_url(&self, filename: &str, expiry: Option<u64>) -> Result<Value> {
		match expiry {
			Some(expiry) => {
				let expiry = expiry.to_string();

				self.transport
					.get("/v2/files/jwt", &[("filename", filename), ("expiry", expiry.as_str())])
					.await
			},
			None => self.transport.get("/v2/files/jwt", &[("filename", filename)]).await,
		}
	}

	async fn get_meta(&self, path: &str, filename: &str) -> Result<Value> {
		self.transport.get(path, &[("filename", filename)]).await
	}

	async fn set_meta_field(&self, path: &str, filename: &str, body: Value) -> Result<Value> {
		self.transport.post(path, body, &[("filename", filename)]).await
	}

	async fn post_options(&self, path: &str, filename: &str, options: Option<Value>) -> Result<Value> {
		let body = options.unwrap_or_else(|| Value::Object(Map::new()));

		self.transport.post(path, body, &[("filename", filename)]).await
	}
}
