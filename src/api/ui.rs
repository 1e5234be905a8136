//! Embedded web UI
//!
//! A single static page served at `/`. It posts the form to
//! `/api/respond` and renders the reply: response-type label, reply text
//! with `**bold**` markers honored, and an audio player when the reply
//! carries speech. Bold rendering goes through text nodes, never innerHTML,
//! so reply text cannot inject markup.

/// The index page, served as-is.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Wellness Companion</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 640px; margin: 2rem auto; padding: 0 1rem; color: #333; }
  h1 { font-size: 1.5rem; }
  textarea { width: 100%; min-height: 6rem; padding: 0.5rem; font: inherit; box-sizing: border-box; }
  button { margin-top: 0.5rem; padding: 0.5rem 1.5rem; font: inherit; cursor: pointer; }
  #status { margin-top: 1rem; color: #666; }
  #result { margin-top: 1rem; }
  #response-type { font-weight: 600; color: #2a6f4e; }
  #response-text { white-space: pre-wrap; margin-top: 0.5rem; }
  audio { margin-top: 1rem; width: 100%; }
</style>
</head>
<body>
<h1>Wellness Companion</h1>
<p>Share your feelings, and this assistant will analyze your sentiment and respond as a supportive psychologist.</p>
<textarea id="input" placeholder="How are you feeling today?"></textarea>
<br>
<button id="submit">Submit</button>
<div id="status"></div>
<div id="result" hidden>
  <div>Response Type: <span id="response-type"></span></div>
  <div id="response-text"></div>
  <audio id="player" controls hidden></audio>
</div>
<script>
const inputEl = document.getElementById('input');
const submitEl = document.getElementById('submit');
const statusEl = document.getElementById('status');
const resultEl = document.getElementById('result');
const typeEl = document.getElementById('response-type');
const textEl = document.getElementById('response-text');
const playerEl = document.getElementById('player');

function renderText(target, text) {
  target.textContent = '';
  text.split('**').forEach(function (part, i) {
    if (i % 2 === 1) {
      const strong = document.createElement('strong');
      strong.textContent = part;
      target.appendChild(strong);
    } else {
      target.appendChild(document.createTextNode(part));
    }
  });
}

submitEl.addEventListener('click', async function () {
  const text = inputEl.value;
  if (!text.trim()) {
    statusEl.textContent = 'Please enter some text to analyze.';
    resultEl.hidden = true;
    return;
  }

  statusEl.textContent = 'Thinking...';
  submitEl.disabled = true;
  try {
    const res = await fetch('/api/respond', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ text: text })
    });
    const body = await res.json();
    if (!res.ok) {
      statusEl.textContent = (body.error && body.error.message) ||
        'Something went wrong. Please try again.';
      resultEl.hidden = true;
      return;
    }

    typeEl.textContent = body.response_type;
    renderText(textEl, body.text);
    if (body.audio) {
      playerEl.src = body.audio.src;
      playerEl.hidden = false;
    } else {
      playerEl.removeAttribute('src');
      playerEl.hidden = true;
    }
    resultEl.hidden = false;
    statusEl.textContent = '';
  } catch (err) {
    statusEl.textContent = 'Something went wrong. Please try again.';
    resultEl.hidden = true;
  } finally {
    submitEl.disabled = false;
  }
});
</script>
</body>
</html>
"##;
