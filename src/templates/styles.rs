//! CSS styles for the banner studio editor page.
//!
//! The banner itself never depends on these; it carries inline styles only.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Montserrat:wght@500;700;800&display=swap');

:root {
    --bg: #f4f5f7;
    --panel: #ffffff;
    --fg: #1f2933;
    --muted: #6b7280;
    --border: #e5e7eb;
    --accent: #00274c;
    --accent-2: #fcba30;
    --danger: #c0392b;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.5;
    color: var(--fg);
    background: var(--bg);
}

.app-header {
    background: var(--accent);
    color: #fff;
    padding: 0.75rem 1.5rem;
    font-weight: 700;
    letter-spacing: 0.02em;
}

.layout {
    display: grid;
    grid-template-columns: 380px 1fr;
    gap: 1.5rem;
    padding: 1.5rem;
    align-items: start;
}

.panel {
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 1.25rem;
}

.panel h2 {
    font-size: 0.8rem;
    text-transform: uppercase;
    letter-spacing: 0.06em;
    color: var(--muted);
    margin: 1.25rem 0 0.5rem;
}
.panel h2:first-child { margin-top: 0; }

.field { margin-bottom: 0.75rem; }
.field label { display: block; font-size: 0.85rem; font-weight: 600; margin-bottom: 0.25rem; }
.field input[type="text"] {
    width: 100%;
    padding: 0.5rem 0.6rem;
    border: 1px solid var(--border);
    border-radius: 6px;
    font-size: 0.9rem;
}
.field input[type="range"] { width: 100%; }
.field .value { font-size: 0.75rem; color: var(--muted); float: right; }

.color-row { display: flex; align-items: center; gap: 0.5rem; }
.color-row input[type="color"] { width: 36px; height: 32px; border: none; background: none; cursor: pointer; }
.color-row input[type="text"] { width: 100px; font-family: monospace; text-transform: uppercase; }
.color-row input.pending { border-color: var(--accent-2); }

.upload-area {
    border: 2px dashed var(--border);
    border-radius: 8px;
    padding: 0.75rem;
    text-align: center;
    font-size: 0.85rem;
    color: var(--muted);
    cursor: pointer;
}
.upload-area:hover { border-color: var(--accent); }
.upload-area input[type="file"] { display: none; }

.file-selected {
    display: none;
    align-items: center;
    justify-content: space-between;
    gap: 0.5rem;
    padding: 0.5rem 0.75rem;
    background: var(--bg);
    border-radius: 6px;
    font-size: 0.85rem;
}
.file-selected .name { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }

.btn {
    display: inline-flex;
    align-items: center;
    gap: 0.4rem;
    padding: 0.5rem 1rem;
    background: var(--accent);
    color: #fff;
    border: none;
    border-radius: 6px;
    font-size: 0.85rem;
    font-weight: 600;
    cursor: pointer;
}
.btn:disabled { opacity: 0.6; cursor: default; }
.btn.secondary { background: var(--bg); color: var(--fg); border: 1px solid var(--border); }
.btn.link { background: none; color: var(--danger); padding: 0; }

.search-row { display: flex; gap: 0.5rem; }
.search-row input { flex: 1; }

.suggestions-box { margin-top: 0.5rem; }
.suggestion-chip {
    display: inline-block;
    margin: 0 0.3rem 0.3rem 0;
    padding: 0.2rem 0.6rem;
    background: var(--bg);
    border: 1px solid var(--border);
    border-radius: 999px;
    font-size: 0.8rem;
    cursor: pointer;
}
.suggestion-chip:hover { border-color: var(--accent); }

.image-results {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 0.4rem;
    margin-top: 0.5rem;
}
.image-result { cursor: pointer; font-size: 0.65rem; color: var(--muted); }
.image-result img { width: 100%; height: 64px; object-fit: cover; border-radius: 4px; display: block; }
.image-result:hover img { outline: 2px solid var(--accent); }

.preview-actions { display: flex; gap: 0.5rem; margin-bottom: 1rem; }

#banner-preview { display: flex; justify-content: center; }

.banner-empty-state {
    width: 600px;
    min-height: 450px;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 0.75rem;
    color: var(--muted);
    border: 2px dashed var(--border);
    border-radius: 10px;
}

.spinner {
    width: 12px;
    height: 12px;
    border: 2px solid rgba(255,255,255,0.4);
    border-top-color: #fff;
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }

.toast {
    position: fixed;
    bottom: 1.5rem;
    right: 1.5rem;
    padding: 0.75rem 1rem;
    background: var(--accent);
    color: #fff;
    border-radius: 8px;
    opacity: 0;
    transform: translateY(10px);
    transition: all 0.2s ease;
    pointer-events: none;
}
.toast.show { opacity: 1; transform: translateY(0); }
.toast.toast-error { background: var(--danger); }
"#;
