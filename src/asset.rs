use head_core::TriMesh;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| anyhow::anyhow!("reading {} failed: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_head_mesh(url: &str) -> anyhow::Result<TriMesh> {
    let bytes = fetch_bytes(url).await?;
    log::info!("[asset] {} ({} bytes)", url, bytes.len());
    Ok(TriMesh::from_glb(&bytes)?)
}
