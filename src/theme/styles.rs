//! Global CSS styles for Teach & Tell.
//!
//! Dark reading-room palette: parchment text, brass accents for the course,
//! lamp-light amber for the mystery.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* BACKGROUNDS */
  --ink: #121212;
  --ink-lighter: #1b1b1f;
  --ink-border: #2a2a30;

  /* ACCENTS */
  --brass: #c9a24b;
  --brass-glow: rgba(201, 162, 75, 0.3);
  --amber: #ffb347;
  --teal: #3fb8a6;
  --teal-glow: rgba(63, 184, 166, 0.25);

  /* TEXT */
  --text-primary: #f2ede3;
  --text-secondary: rgba(242, 237, 227, 0.72);
  --text-muted: rgba(242, 237, 227, 0.5);

  /* SEMANTIC */
  --danger: #ff5c6c;
  --success: #6fcf7f;
  --highlight: rgba(255, 214, 102, 0.35);

  /* Typography */
  --font-serif: 'Cormorant Garamond', Georgia, serif;
  --font-sans: 'Inter', 'Segoe UI', system-ui, sans-serif;

  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;
  --text-3xl: 2.5rem;

  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--ink);
  color: var(--text-primary);
  line-height: 1.6;
  min-height: 100vh;
}

/* === Typography === */
.page-title {
  font-family: var(--font-serif);
  font-size: var(--text-3xl);
  font-weight: 400;
  color: var(--brass);
  text-shadow: 0 0 24px var(--brass-glow);
  letter-spacing: 0.06em;
}

.tagline {
  color: var(--text-secondary);
  font-style: italic;
}

.loading {
  color: var(--text-muted);
  padding: 2rem;
}

/* === Buttons === */
.btn-primary {
  background: var(--brass);
  color: var(--ink);
  border: none;
  border-radius: 6px;
  padding: 0.6rem 1.4rem;
  font-weight: 600;
  cursor: pointer;
  transition: opacity var(--transition-fast);
}

.btn-primary:disabled { opacity: 0.5; cursor: default; }

.btn-secondary {
  background: transparent;
  color: var(--text-secondary);
  border: 1px solid var(--ink-border);
  border-radius: 6px;
  padding: 0.6rem 1.2rem;
  cursor: pointer;
}

.btn-link {
  background: none;
  border: none;
  color: var(--teal);
  cursor: pointer;
  font-size: var(--text-sm);
}

.btn-link:hover { text-decoration: underline; }

.btn-continue {
  align-self: center;
  margin: 1.5rem 0;
  padding: 0.7rem 2.5rem;
  background: transparent;
  color: var(--brass);
  border: 1px solid var(--brass);
  border-radius: 999px;
  cursor: pointer;
  transition: background var(--transition-fast);
}

.btn-continue:hover { background: var(--brass-glow); }

/* === Forms === */
.form-error { color: var(--danger); font-size: var(--text-sm); }
.form-status { color: var(--text-secondary); font-size: var(--text-sm); }
.form-success { color: var(--success); font-size: var(--text-sm); }

/* === Portal === */
.portal {
  max-width: 640px;
  margin: 0 auto;
  padding: 4rem 2rem;
  display: flex;
  flex-direction: column;
  gap: 2.5rem;
  text-align: center;
}

.portal-form {
  display: flex;
  flex-direction: column;
  gap: 0.8rem;
  align-items: center;
}

.portal-input {
  width: 260px;
  padding: 0.7rem 1rem;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 6px;
  color: var(--text-primary);
  text-align: center;
  letter-spacing: 0.15em;
  text-transform: uppercase;
}

.portal-input:focus { outline: none; border-color: var(--teal); }

.mode-select { display: flex; flex-direction: column; gap: 1rem; align-items: center; }

.mode-cards { display: flex; gap: 1.5rem; }

.mode-card {
  width: 220px;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 10px;
  color: var(--text-primary);
  cursor: pointer;
  transition: border-color var(--transition-normal), transform var(--transition-fast);
}

.mode-card:hover { border-color: var(--brass); transform: translateY(-2px); }
.mode-card-icon { font-size: 2rem; }
.mode-card-title { font-family: var(--font-serif); font-size: var(--text-xl); color: var(--brass); }
.mode-card-text { font-size: var(--text-sm); color: var(--text-secondary); }

/* === Teach === */
.teach { display: flex; flex-direction: column; height: 100vh; }

.teach-header {
  display: flex;
  align-items: center;
  gap: 1.5rem;
  padding: 1rem 1.5rem;
  border-bottom: 1px solid var(--ink-border);
}

.teach-header .page-title { font-size: var(--text-xl); }
.teach-header-actions { margin-left: auto; display: flex; gap: 1rem; }

.teach-layout { display: flex; flex: 1; overflow: hidden; }

.teach-stream {
  flex: 1;
  overflow-y: auto;
  padding: 1.5rem 2rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
}

.week-title { font-family: var(--font-serif); font-size: var(--text-xl); color: var(--brass); }

.week-menu {
  width: 260px;
  border-right: 1px solid var(--ink-border);
  padding: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  overflow-y: auto;
}

.week-menu-title { font-size: var(--text-sm); color: var(--text-muted); text-transform: uppercase; }

.week-item {
  display: flex;
  flex-direction: column;
  align-items: flex-start;
  padding: 0.7rem 0.8rem;
  background: transparent;
  border: 1px solid transparent;
  border-radius: 6px;
  color: var(--text-primary);
  cursor: pointer;
  text-align: left;
}

.week-item:hover { background: var(--ink-lighter); }
.week-item-active { border-color: var(--brass); background: var(--ink-lighter); }
.week-item-meta { font-size: var(--text-xs); color: var(--text-muted); }
.week-item-error { color: var(--danger); }

.progress-chip {
  position: relative;
  width: 160px;
  height: 1.6rem;
  border-radius: 999px;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  overflow: hidden;
}

.progress-chip-bar {
  position: absolute;
  inset: 0 auto 0 0;
  background: var(--teal-glow);
  transition: width var(--transition-normal);
}

.progress-chip-label {
  position: relative;
  display: block;
  text-align: center;
  font-size: var(--text-xs);
  line-height: 1.6rem;
}

.task-toggle {
  margin-top: 0.8rem;
  padding: 0.4rem 1rem;
  background: transparent;
  border: 1px solid var(--teal);
  border-radius: 6px;
  color: var(--teal);
  cursor: pointer;
}

.task-toggle-done { background: var(--teal); color: var(--ink); }

.notes-panel {
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 10px;
  padding: 1rem;
}

.notes-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }
.notes-status { font-size: var(--text-xs); color: var(--text-muted); }

.notes-textarea {
  width: 100%;
  background: var(--ink);
  border: 1px solid var(--ink-border);
  border-radius: 6px;
  color: var(--text-primary);
  padding: 0.7rem;
  font-family: var(--font-sans);
  resize: vertical;
}

/* === Messages === */
.message {
  display: flex;
  gap: 0.8rem;
  max-width: 760px;
}

.message-avatar { width: 40px; height: 40px; border-radius: 50%; object-fit: cover; }
.message-main { flex: 1; }

.message-sender {
  font-size: var(--text-xs);
  color: var(--text-muted);
  margin-bottom: 0.2rem;
  display: flex;
  gap: 0.5rem;
}

.message-badge {
  color: var(--brass);
  border: 1px solid var(--brass);
  border-radius: 4px;
  padding: 0 0.3rem;
}

.message-body {
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 10px;
  padding: 0.8rem 1rem;
}

.message-body p + p, .message-body ul, .message-body ol { margin-top: 0.6rem; }
.message-body ul, .message-body ol { padding-left: 1.4rem; }
.message-body h3 { font-family: var(--font-serif); color: var(--brass); margin-bottom: 0.4rem; }
.message-body code { background: var(--ink); padding: 0 0.3rem; border-radius: 3px; }

.message-user { align-self: flex-end; }
.message-user .message-body { background: var(--teal-glow); }
.message-error .message-body { border-color: var(--danger); color: var(--danger); }
.message-system .message-body { font-style: italic; color: var(--amber); }
.message-task .message-body { border-left: 3px solid var(--teal); }
.message-image { max-width: 100%; margin-top: 0.5rem; border-radius: 6px; }

.message-buttons { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 0.5rem; }

.message-button {
  padding: 0.35rem 0.9rem;
  background: transparent;
  border: 1px solid var(--amber);
  border-radius: 999px;
  color: var(--amber);
  cursor: pointer;
}

.highlight {
  background: var(--highlight);
  border-radius: 3px;
  cursor: help;
}

/* === Explanation popover / toast === */
.explanation-popover {
  position: fixed;
  right: 1.5rem;
  bottom: 1.5rem;
  width: 340px;
  max-height: 50vh;
  overflow-y: auto;
  background: var(--ink-lighter);
  border: 1px solid var(--brass);
  border-radius: 10px;
  box-shadow: 0 8px 30px rgba(0, 0, 0, 0.5);
  padding: 1rem;
  z-index: 30;
}

.explanation-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }
.explanation-title { color: var(--brass); font-weight: 600; }
.explanation-close, .drawer-close, .clue-panel-close {
  background: none;
  border: none;
  color: var(--text-muted);
  font-size: var(--text-lg);
  cursor: pointer;
}
.explanation-loading { color: var(--text-muted); font-style: italic; }

.toast {
  position: fixed;
  left: 50%;
  bottom: 5rem;
  transform: translateX(-50%);
  background: var(--ink-lighter);
  border: 1px solid var(--teal);
  border-radius: 999px;
  padding: 0.5rem 1.2rem;
  font-size: var(--text-sm);
  cursor: pointer;
  z-index: 25;
}

/* === Tell === */
.tell { display: flex; flex-direction: column; height: 100vh; }

.tell-header {
  display: flex;
  align-items: center;
  gap: 0.8rem;
  padding: 0.8rem 1rem;
  border-bottom: 1px solid var(--ink-border);
}

.tell-title { flex: 1; font-family: var(--font-serif); font-size: var(--text-xl); color: var(--amber); }

.tell-nav-btn {
  width: 40px;
  height: 40px;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 8px;
  color: var(--text-primary);
  cursor: pointer;
}

.chat-area {
  flex: 1;
  overflow-y: auto;
  padding: 1rem 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
}

.typing-indicator { padding: 0.3rem 1.5rem; font-size: var(--text-sm); color: var(--text-muted); }
.typing-dots { margin-right: 0.5rem; animation: pulse 1.2s ease-in-out infinite; }

@keyframes pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.4; }
}

.chat-input-bar {
  display: flex;
  gap: 0.5rem;
  padding: 0.8rem 1rem;
  border-top: 1px solid var(--ink-border);
}

.chat-input-textarea {
  flex: 1;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 8px;
  color: var(--text-primary);
  padding: 0.6rem 0.8rem;
  font-family: var(--font-sans);
  resize: none;
}

.chat-input-textarea:disabled { opacity: 0.5; }

.chat-send-btn {
  padding: 0 1.2rem;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 8px;
  color: var(--text-muted);
}

.chat-send-btn-active { background: var(--amber); color: var(--ink); cursor: pointer; }

.drawer {
  position: fixed;
  top: 0;
  bottom: 0;
  width: 300px;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  padding: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  z-index: 20;
}

.drawer-left { left: 0; }
.drawer-right { right: 0; }
.drawer-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }

.drawer-item {
  display: grid;
  grid-template-columns: 44px 1fr;
  grid-template-rows: auto auto;
  column-gap: 0.6rem;
  align-items: center;
  padding: 0.5rem;
  background: transparent;
  border: 1px solid transparent;
  border-radius: 8px;
  color: var(--text-primary);
  cursor: pointer;
  text-align: left;
}

.drawer-item:hover { background: var(--ink); }
.drawer-item-active { border-color: var(--amber); }
.drawer-portrait, .drawer-emoji { grid-row: span 2; width: 40px; height: 40px; border-radius: 50%; font-size: 1.5rem; text-align: center; }
.drawer-status { font-size: var(--text-xs); color: var(--text-muted); }

.game-menu {
  position: absolute;
  top: 4rem;
  right: 1rem;
  background: var(--ink-lighter);
  border: 1px solid var(--ink-border);
  border-radius: 8px;
  display: flex;
  flex-direction: column;
  z-index: 20;
}

.game-menu-item {
  padding: 0.6rem 1.2rem;
  background: none;
  border: none;
  color: var(--text-primary);
  text-align: left;
  cursor: pointer;
}

.game-menu-item:hover { background: var(--ink); }

.clue-panel {
  position: fixed;
  top: 4rem;
  right: 1rem;
  width: 360px;
  max-height: 75vh;
  overflow-y: auto;
  background: var(--ink-lighter);
  border: 1px solid var(--amber);
  border-radius: 10px;
  padding: 1rem;
  z-index: 22;
}

.clue-panel-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; color: var(--amber); }
.clue-panel-image { width: 100%; border-radius: 6px; margin-bottom: 0.5rem; }

/* === Tutorial === */
.tutorial-backdrop {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.55);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 40;
}

.tutorial-tooltip {
  width: 360px;
  background: var(--ink-lighter);
  border: 1px solid var(--brass);
  border-radius: 10px;
  padding: 1.2rem;
}

.tutorial-step-count { font-size: var(--text-xs); color: var(--text-muted); }
.tutorial-title { color: var(--brass); margin: 0.3rem 0; }
.tutorial-text { color: var(--text-secondary); }
.tutorial-actions { display: flex; justify-content: flex-end; gap: 0.5rem; margin-top: 1rem; }

.tutorial-target {
  position: relative;
  z-index: 41;
  box-shadow: 0 0 0 3px var(--brass), 0 0 20px var(--brass-glow);
}
"#;
