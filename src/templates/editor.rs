//! Editor page for the banner studio.
//!
//! The form posts every change to `/api/preview` and swaps in the returned
//! fragment, so the page never renders the banner itself.

use crate::models::{
    CTA_FONT, DEFAULT_CTA_BG, DEFAULT_CTA_TEXT_COLOR, DEFAULT_ICON_COLOR, DEFAULT_TEXT_COLOR,
    DETAILS_FONT, LOGO_SIZE, SUBHEADING_FONT, TITLE_FONT,
};

use super::components::{color_field, size_slider, text_field, upload_area};
use super::styles::STYLE;
use crate::banner::empty_state;

// ============================================================================
// Editor Template
// ============================================================================

pub fn render_editor_page() -> String {
    let details = [
        text_field("event_name", "Event name", "Spring Trade Show 2025"),
        text_field("subheading", "Subheading", "The industry's biggest week"),
        text_field("location", "Location", "Moscone Center, San Francisco"),
        text_field("dates", "Dates", "May 12-14, 2025"),
        text_field("cta_text", "Button text", "Book a meeting"),
    ]
    .join("\n");

    let colors = [
        color_field("color_text", "Text", DEFAULT_TEXT_COLOR),
        color_field("color_icon", "Icons", DEFAULT_ICON_COLOR),
        color_field("color_cta_bg", "Button background", DEFAULT_CTA_BG),
        color_field("color_cta_text", "Button text", DEFAULT_CTA_TEXT_COLOR),
    ]
    .join("\n");

    let typography = [
        size_slider("title_font_size", "Title", TITLE_FONT, false),
        size_slider("subheading_font_size", "Subheading", SUBHEADING_FONT, false),
        size_slider("details_font_size", "Location & dates", DETAILS_FONT, false),
        size_slider("cta_font_size", "Button", CTA_FONT, false),
    ]
    .join("\n");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Banner Studio</title>
    <style>{STYLE}</style>
    <script src="https://cdn.jsdelivr.net/npm/html2canvas@1.4.1/dist/html2canvas.min.js"></script>
</head>
<body>
    <header class="app-header">Banner Studio</header>
    <main class="layout">
        <section class="panel">
            <h2>Event details</h2>
            {details}

            <h2>Background</h2>
            {background_upload}
            <div class="field">
                <button type="button" class="btn secondary" id="suggest-btn" onclick="suggestImages()">Suggest search terms</button>
                <div class="suggestions-box" id="suggestions-box" style="display:none">
                    <div id="suggestions-list"></div>
                </div>
            </div>
            <div class="field">
                <div class="search-row">
                    <input type="text" id="image_query" placeholder="Search photos..." onkeydown="if(event.key==='Enter')searchImages()">
                    <button type="button" class="btn" id="search-btn" onclick="searchImages()">Search</button>
                </div>
                <div class="image-results" id="image-results"></div>
            </div>

            <h2>Logos</h2>
            {logo_upload}
            {logo_slider}
            {partner_upload}
            {partner_slider}

            <h2>Colors</h2>
            {colors}

            <h2>Typography</h2>
            {typography}
        </section>

        <section>
            <div class="preview-actions">
                <button type="button" class="btn" onclick="copyMailchimpHTML()">Copy Mailchimp HTML</button>
                <button type="button" class="btn secondary" onclick="downloadPNG()">Download PNG</button>
            </div>
            <div id="banner-preview">{empty}</div>
        </section>
    </main>
    <div class="toast" id="toast"></div>
    <script>{script}</script>
</body>
</html>"##,
        background_upload = upload_area("background", "Background image"),
        logo_upload = upload_area("logo", "Logo"),
        logo_slider = size_slider("logo_size", "Logo size", LOGO_SIZE, true),
        partner_upload = upload_area("partner_logo", "Partner logo"),
        partner_slider = size_slider("partner_logo_size", "Partner logo size", LOGO_SIZE, true),
        empty = empty_state(),
        script = EDITOR_SCRIPT,
    )
}

const EDITOR_SCRIPT: &str = r##"
const images = { background: '', logo: '', partner_logo: '' };
const SLOT_FIELDS = { background: 'image_url', logo: 'logo_url', partner_logo: 'partner_logo_url' };
const SLOT_SLIDERS = { logo: 'logo_size_row', partner_logo: 'partner_logo_size_row' };
const SLOT_LABELS = { background: 'background image', logo: 'logo', partner_logo: 'partner logo' };
const HEX_FULL = /^#?([0-9a-fA-F]{6})$/;
const HEX_PREFIX = /^#?[0-9a-fA-F]{0,5}$/;

let previewTimer = null;
let previewSeq = 0;

document.addEventListener('DOMContentLoaded', () => {
    document.querySelectorAll('input[type="text"][data-field]').forEach(el => {
        el.addEventListener('input', schedulePreview);
    });

    document.querySelectorAll('input[type="range"][data-field]').forEach(el => {
        el.addEventListener('input', () => {
            document.getElementById(el.id + '_value').textContent = el.value + 'px';
            schedulePreview();
        });
    });

    document.querySelectorAll('input[type="color"][data-field]').forEach(picker => {
        const hexEl = document.getElementById(picker.id + '_hex');
        picker.addEventListener('input', () => {
            hexEl.value = picker.value.toUpperCase();
            hexEl.classList.remove('pending');
            schedulePreview();
        });
        hexEl.addEventListener('input', () => {
            const text = hexEl.value.trim();
            const match = HEX_FULL.exec(text);
            if (match) {
                picker.value = '#' + match[1].toLowerCase();
                hexEl.classList.remove('pending');
                schedulePreview();
            } else {
                hexEl.classList.toggle('pending', HEX_PREFIX.test(text));
            }
        });
        hexEl.addEventListener('blur', () => {
            hexEl.value = picker.value.toUpperCase();
            hexEl.classList.remove('pending');
        });
    });

    document.querySelectorAll('input[type="file"][data-slot]').forEach(el => {
        el.addEventListener('change', () => handleUpload(el));
    });

    document.querySelectorAll('[data-clear]').forEach(btn => {
        btn.addEventListener('click', () => clearImage(btn.dataset.clear));
    });
});

// ── Form state ──

function getFormData() {
    const data = {};
    document.querySelectorAll('[data-field]').forEach(el => {
        data[el.dataset.field] = el.type === 'range' ? Number(el.value) : el.value.trim();
    });
    for (const [slot, field] of Object.entries(SLOT_FIELDS)) {
        data[field] = images[slot];
    }
    return data;
}

async function postJson(url, body) {
    const resp = await fetch(url, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
    });
    const data = await resp.json();
    if (data.error) throw new Error(data.error);
    if (!resp.ok) throw new Error('Request failed (' + resp.status + ')');
    return data;
}

function schedulePreview() {
    clearTimeout(previewTimer);
    previewTimer = setTimeout(updatePreview, 120);
}

async function updatePreview() {
    const seq = ++previewSeq;
    try {
        const data = await postJson('/api/preview', getFormData());
        if (seq === previewSeq) {
            document.getElementById('banner-preview').innerHTML = data.html;
        }
    } catch (err) {
        showToast('Preview failed: ' + err.message, true);
    }
}

// ── Images ──

function setImage(slot, reference, label) {
    if (!reference) return;
    images[slot] = reference;
    document.getElementById(slot + '-upload-area').style.display = 'none';
    document.getElementById(slot + '-file-selected').style.display = 'flex';
    document.getElementById(slot + '-file-name').textContent = label;
    if (SLOT_SLIDERS[slot]) document.getElementById(SLOT_SLIDERS[slot]).style.display = '';
    schedulePreview();
}

function clearImage(slot) {
    images[slot] = '';
    document.getElementById(slot + '_upload').value = '';
    document.getElementById(slot + '-upload-area').style.display = '';
    document.getElementById(slot + '-file-selected').style.display = 'none';
    if (SLOT_SLIDERS[slot]) document.getElementById(SLOT_SLIDERS[slot]).style.display = 'none';
    schedulePreview();
}

async function handleUpload(input) {
    const file = input.files[0];
    if (!file) return;
    const body = new FormData();
    body.append('file', file);
    try {
        const resp = await fetch('/api/ingest', { method: 'POST', body });
        const data = await resp.json();
        if (data.error) throw new Error(data.error);
        setImage(input.dataset.slot, data.data_uri, data.file_name);
    } catch (err) {
        input.value = '';
        showToast(err.message || 'Failed to read image', true);
    }
}

async function withBusy(btn, label, action) {
    const original = btn.innerHTML;
    btn.disabled = true;
    btn.innerHTML = '<span class="spinner"></span> ' + label;
    try {
        await action();
    } finally {
        btn.disabled = false;
        btn.innerHTML = original;
    }
}

async function suggestImages() {
    const location = document.getElementById('location').value.trim();
    if (!location) {
        showToast('Enter a location first', true);
        return;
    }
    await withBusy(document.getElementById('suggest-btn'), 'Thinking...', async () => {
        try {
            const data = await postJson('/api/suggest-image', { location });
            const list = document.getElementById('suggestions-list');
            list.innerHTML = data.suggestions.map(term =>
                `<span class="suggestion-chip" title="Click to copy and search">${escapeHtml(term)}</span>`
            ).join('');
            list.querySelectorAll('.suggestion-chip').forEach(chip => {
                chip.addEventListener('click', () => useSuggestion(chip.textContent));
            });
            document.getElementById('suggestions-box').style.display = '';
        } catch (err) {
            showToast(err.message || 'Failed to get suggestions', true);
        }
    });
}

function useSuggestion(term) {
    navigator.clipboard.writeText(term).then(() => showToast('Copied: ' + term));
    document.getElementById('image_query').value = term;
    searchImages();
}

async function searchImages() {
    const query = document.getElementById('image_query').value.trim();
    if (!query) {
        showToast('Enter a search term first', true);
        return;
    }
    const btn = document.getElementById('search-btn');
    if (btn.disabled) return;
    await withBusy(btn, 'Searching...', async () => {
        try {
            const data = await postJson('/api/search-images', { query });
            const grid = document.getElementById('image-results');
            grid.innerHTML = '';
            if (data.images.length === 0) showToast('No images found');
            data.images.forEach(img => {
                const cell = document.createElement('div');
                cell.className = 'image-result';
                cell.innerHTML = `<img src="${escapeHtml(img.thumb)}" alt="${escapeHtml(img.alt || '')}"><span>${escapeHtml(img.photographer)}</span>`;
                cell.addEventListener('click', () => setImage('background', img.full, 'Photo by ' + img.photographer));
                grid.appendChild(cell);
            });
        } catch (err) {
            showToast(err.message || 'Image search failed', true);
        }
    });
}

// ── Export ──

function localImageWarning(data) {
    const names = Object.entries(SLOT_FIELDS)
        .filter(([, field]) => data[field].startsWith('data:'))
        .map(([slot]) => SLOT_LABELS[slot]);
    if (names.length === 0) return null;
    const last = names.pop();
    const listed = names.length ? names.join(', ') + ' and ' + last : last;
    return `Your ${listed} ${names.length ? 'are' : 'is'} uploaded locally. ` +
        'For Mailchimp, you need publicly hosted image URLs.\n\n' +
        'Upload your images to Mailchimp Content Studio first, then replace the URLs in the HTML.\n\n' +
        'Copy the HTML anyway?';
}

async function copyMailchimpHTML() {
    const data = getFormData();
    const warning = localImageWarning(data);
    if (warning && !confirm(warning)) return;
    try {
        const result = await postJson('/api/render', data);
        await navigator.clipboard.writeText(result.html);
        showToast('Mailchimp HTML copied to clipboard!');
    } catch (err) {
        showToast('Failed to copy HTML', true);
    }
}

async function downloadPNG() {
    const banner = document.querySelector('#banner-preview .banner');
    if (!banner) {
        showToast('Fill in the banner details first', true);
        return;
    }
    showToast('Generating PNG...');
    try {
        const canvas = await html2canvas(banner, {
            width: banner.offsetWidth,
            height: banner.offsetHeight,
            scale: 2,
            useCORS: true,
            allowTaint: false,
            backgroundColor: '#000000',
        });
        const link = document.createElement('a');
        link.download = 'event-banner.png';
        link.href = canvas.toDataURL('image/png');
        link.click();
        showToast('PNG downloaded!');
    } catch (err) {
        showToast('Failed to generate PNG', true);
    }
}

// ── Helpers ──

function escapeHtml(str) {
    const div = document.createElement('div');
    div.textContent = str;
    return div.innerHTML.replace(/"/g, '&quot;').replace(/'/g, '&#39;');
}

let toastTimer = null;
function showToast(message, isError = false) {
    const toast = document.getElementById('toast');
    toast.textContent = message;
    toast.className = 'toast show' + (isError ? ' toast-error' : '');
    clearTimeout(toastTimer);
    toastTimer = setTimeout(() => { toast.className = 'toast'; }, 3000);
}
"##;
