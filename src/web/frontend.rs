//! Embedded HTML/CSS/JS frontend for the loglens dashboard.
//!
//! The entire page is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. All chart
//! geometry (slice paths, polygons, rectangles) is computed server-side;
//! the page only places the shapes it receives.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>loglens</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header h1 span { color: var(--accent); font-family: var(--mono); }
#health { font-size: 13px; color: var(--text-muted); }
#health.ok::before { content: '● '; color: var(--green); }
#health.down::before { content: '● '; color: var(--red); }

.querybar { display: flex; gap: 8px; margin-bottom: 20px; }
.querybar input {
  flex: 1;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text);
  font-family: var(--mono);
  padding: 8px 12px;
}
.querybar button {
  background: var(--accent);
  border: none;
  border-radius: var(--radius);
  color: #0d1117;
  font-weight: 600;
  padding: 8px 16px;
  cursor: pointer;
}
#queryerror { color: var(--red); font-size: 13px; margin: -12px 0 12px; min-height: 18px; }

.tiles { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-bottom: 20px; }
.tile {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 14px;
}
.tile .label { color: var(--text-muted); font-size: 12px; text-transform: uppercase; }
.tile .value { font-size: 26px; font-weight: 600; font-family: var(--mono); }
.tile .value.green { color: var(--green); }
.tile .value.yellow { color: var(--yellow); }
.tile .value.red { color: var(--red); }

.grid2 { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin-bottom: 20px; }
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 14px;
}
.card h2 { font-size: 14px; margin-bottom: 10px; color: var(--text-muted); }
.card svg { display: block; margin: 0 auto; }
.legend { font-size: 12px; color: var(--text-muted); margin-top: 8px; }
.legend span { margin-right: 12px; }
.legend i { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 4px; }

table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; }
td.num { font-family: var(--mono); text-align: right; }
.sev-normal { color: var(--green); }
.sev-warning { color: var(--yellow); }
.sev-critical { color: var(--red); }

footer { color: var(--text-muted); font-size: 12px; margin-top: 16px; }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1><span>loglens</span> dashboard</h1>
    <div id="health">checking…</div>
  </header>

  <div class="querybar">
    <input id="query" value="*" spellcheck="false" placeholder="level=ERROR AND service:api">
    <button id="run">Run</button>
  </div>
  <div id="queryerror"></div>

  <div class="tiles" id="tiles"></div>

  <div class="grid2">
    <div class="card"><h2>Log volume (5m buckets, stacked by level)</h2><div id="timeline"></div></div>
    <div class="card"><h2>Activity by hour of week</h2><div id="grid"></div></div>
  </div>

  <div class="grid2">
    <div class="card"><h2>Services</h2><div id="pie"></div><div class="legend" id="pielegend"></div></div>
    <div class="card"><h2>Levels</h2><div id="donut"></div><div class="legend" id="donutlegend"></div></div>
  </div>

  <div class="grid2">
    <div class="card"><h2>Service volume treemap</h2><div id="treemap"></div></div>
    <div class="card"><h2>Health radar</h2><div id="radar"></div></div>
  </div>

  <div class="card"><h2>Drift: current hour vs previous</h2><div id="drift"></div></div>

  <footer id="footer"></footer>
</div>

<script>
const PALETTE = ['#58a6ff','#3fb950','#d29922','#f85149','#bc8cff','#39d2c0',
                 '#ff7b72','#79c0ff','#56d364','#e3b341','#d2a8ff','#76e3ea'];
const LEVEL_COLORS = { DEBUG:'#8b949e', INFO:'#58a6ff', WARN:'#d29922',
                       ERROR:'#f85149', FATAL:'#bc8cff', unknown:'#30363d' };
const esc = s => String(s).replace(/[&<>"]/g,
  c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));

let refreshSecs = 30;
let timer = null;

function currentQuery() {
  return encodeURIComponent(document.getElementById('query').value || '*');
}

async function getJSON(url) {
  const resp = await fetch(url);
  const body = await resp.json();
  if (!resp.ok) throw new Error(body.error || resp.statusText);
  return body;
}

async function refresh() {
  const q = currentQuery();
  const errbox = document.getElementById('queryerror');
  errbox.textContent = '';
  try {
    const [summary, timeline, grid, charts, drift] = await Promise.all([
      getJSON('/api/summary?query=' + q),
      getJSON('/api/timeline?query=' + q),
      getJSON('/api/grid?query=' + q),
      getJSON('/api/charts?query=' + q),
      getJSON('/api/drift?query=' + q),
    ]);
    renderTiles(summary);
    renderTimeline(timeline);
    renderGrid(grid);
    renderPie('pie', 'pielegend', charts.pie);
    renderPie('donut', 'donutlegend', charts.donut);
    renderTreemap(charts.treemap);
    renderRadar(charts.radar);
    renderDrift(drift);
    document.getElementById('footer').textContent =
      summary.stats.rows + ' rows, ' + summary.stats.bytes +
      ' bytes scanned — refreshed ' + new Date().toLocaleTimeString();
  } catch (e) {
    // Keep the last-known-good view; describe the failure inline.
    errbox.textContent = e.message;
  }
}

function renderTiles(s) {
  const err = s.error_rate;
  const tiles = [
    { label: 'Records', value: s.total, cls: '' },
    { label: 'Error rate', value: err.rate_pct.toFixed(1) + '%',
      cls: gaugeClass(s.gauges, 'error_rate') },
    { label: 'Trend', value: {up:'▲', down:'▼', stable:'—'}[err.trend], cls: '' },
    { label: 'Activity', value: activityValue(s.gauges),
      cls: gaugeClass(s.gauges, 'activity_level') },
  ];
  document.getElementById('tiles').innerHTML = tiles.map(t =>
    '<div class="tile"><div class="label">' + esc(t.label) +
    '</div><div class="value ' + t.cls + '">' + esc(t.value) + '</div></div>').join('');
}

function gaugeClass(gauges, name) {
  const g = gauges.find(g => g.name === name);
  return g ? g.color : '';
}

function activityValue(gauges) {
  const g = gauges.find(g => g.name === 'activity_level');
  return g ? g.value.toFixed(0) : '0';
}

function renderTimeline(t) {
  if (!t.buckets.length) {
    document.getElementById('timeline').innerHTML = '<p class="legend">no data</p>';
    return;
  }
  const W = 520, H = 160, n = t.buckets.length;
  const peak = Math.max(1, ...t.stacked.length
    ? t.stacked[t.stacked.length - 1].points.map(p => p.y1) : [1]);
  const bw = W / n;
  let bars = '';
  for (const series of t.stacked) {
    const color = LEVEL_COLORS[series.label] || '#8b949e';
    series.points.forEach((p, i) => {
      const h = (p.y1 - p.y0) / peak * H;
      if (h <= 0) return;
      const y = H - p.y1 / peak * H;
      bars += '<rect x="' + (i * bw + 0.5) + '" y="' + y + '" width="' + (bw - 1) +
              '" height="' + h + '" fill="' + color + '"></rect>';
    });
  }
  document.getElementById('timeline').innerHTML =
    '<svg width="' + W + '" height="' + H + '" viewBox="0 0 ' + W + ' ' + H + '">' + bars + '</svg>';
}

function renderGrid(g) {
  const DAYS = ['Sun','Mon','Tue','Wed','Thu','Fri','Sat'];
  const shades = ['#161b22','#0e4429','#006d32','#26a641','#39d353'];
  let rows = '';
  for (let d = 0; d < 7; d++) {
    let cells = '';
    for (let h = 0; h < 24; h++) {
      const level = g.intensity[d][h];
      cells += '<rect x="' + (h * 18) + '" y="0" width="16" height="16" rx="3" fill="' +
               shades[level] + '"><title>' + DAYS[d] + ' ' + h + ':00 — ' +
               g.cells[d][h] + '</title></rect>';
    }
    rows += '<g transform="translate(30,' + (d * 18) + ')">' + cells + '</g>' +
            '<text x="0" y="' + (d * 18 + 12) + '" fill="#8b949e" font-size="10">' +
            DAYS[d] + '</text>';
  }
  document.getElementById('grid').innerHTML =
    '<svg width="470" height="130" viewBox="0 0 470 130">' + rows + '</svg>';
}

function renderPie(id, legendId, slices) {
  if (!slices.length) {
    document.getElementById(id).innerHTML = '<p class="legend">no data</p>';
    document.getElementById(legendId).innerHTML = '';
    return;
  }
  const paths = slices.map((s, i) =>
    '<path d="' + s.path + '" fill="' + PALETTE[i % PALETTE.length] + '"></path>').join('');
  document.getElementById(id).innerHTML =
    '<svg width="240" height="240" viewBox="0 0 240 240">' + paths + '</svg>';
  document.getElementById(legendId).innerHTML = slices.map((s, i) =>
    '<span><i style="background:' + PALETTE[i % PALETTE.length] + '"></i>' +
    esc(s.label) + ' (' + (s.fraction * 100).toFixed(0) + '%)</span>').join('');
}

function renderTreemap(rects) {
  if (!rects.length) {
    document.getElementById('treemap').innerHTML = '<p class="legend">no data</p>';
    return;
  }
  const boxes = rects.map((r, i) =>
    '<g><rect x="' + r.x + '" y="' + r.y + '" width="' + r.w + '" height="' + r.h +
    '" fill="' + PALETTE[i % PALETTE.length] + '" stroke="#0d1117"></rect>' +
    (r.w > 60 && r.h > 18
      ? '<text x="' + (r.x + 4) + '" y="' + (r.y + 14) +
        '" fill="#0d1117" font-size="11">' + esc(r.label) + '</text>'
      : '') + '</g>').join('');
  document.getElementById('treemap').innerHTML =
    '<svg width="480" height="300" viewBox="0 0 480 300">' + boxes + '</svg>';
}

function renderRadar(radar) {
  if (!radar.points.length) {
    document.getElementById('radar').innerHTML = '<p class="legend">no data</p>';
    return;
  }
  const labels = radar.points.map(p =>
    '<text x="' + p.x + '" y="' + (p.y - 6) + '" fill="#8b949e" font-size="10" ' +
    'text-anchor="middle">' + esc(p.label) + ' ' + p.value.toFixed(0) + '</text>').join('');
  document.getElementById('radar').innerHTML =
    '<svg width="240" height="240" viewBox="0 0 240 240">' +
    '<circle cx="120" cy="120" r="100" fill="none" stroke="#30363d"></circle>' +
    '<circle cx="120" cy="120" r="50" fill="none" stroke="#21262d"></circle>' +
    '<polygon points="' + radar.polygon + '" fill="rgba(88,166,255,0.25)" stroke="#58a6ff"></polygon>' +
    labels + '</svg>';
}

function renderDrift(d) {
  if (!d.rows.length) {
    document.getElementById('drift').innerHTML = '<p class="legend">no data in either period</p>';
    return;
  }
  const rows = d.rows.map(r =>
    '<tr><td>' + esc(r.service) + '</td><td>' + esc(r.level) + '</td>' +
    '<td class="num">' + r.baseline + '</td><td class="num">' + r.current + '</td>' +
    '<td class="num">' + (r.delta >= 0 ? '+' : '') + r.delta + '</td>' +
    '<td class="num">' + (r.pct_change === null ? 'new' : r.pct_change.toFixed(1) + '%') + '</td>' +
    '<td class="sev-' + r.severity + '">' + r.severity + '</td></tr>').join('');
  document.getElementById('drift').innerHTML =
    '<table><tr><th>Service</th><th>Level</th><th>Baseline</th><th>Current</th>' +
    '<th>Delta</th><th>Change</th><th>Severity</th></tr>' + rows + '</table>';
}

async function checkHealth() {
  const el = document.getElementById('health');
  try {
    const h = await getJSON('/api/health');
    el.className = h.healthy ? 'ok' : 'down';
    el.textContent = h.base_url;
  } catch (e) {
    el.className = 'down';
    el.textContent = 'dashboard unreachable';
  }
}

function startTimer() {
  stopTimer();
  timer = setInterval(refresh, refreshSecs * 1000);
}

function stopTimer() {
  if (timer !== null) { clearInterval(timer); timer = null; }
}

// Auto-refresh pauses while the page is hidden and resumes on return.
document.addEventListener('visibilitychange', () => {
  if (document.hidden) { stopTimer(); } else { refresh(); startTimer(); }
});

document.getElementById('run').addEventListener('click', refresh);
document.getElementById('query').addEventListener('keydown', e => {
  if (e.key === 'Enter') refresh();
});

(async () => {
  try {
    const cfg = await getJSON('/api/config');
    refreshSecs = cfg.refresh_secs || 30;
  } catch (e) { /* defaults stand */ }
  await checkHealth();
  await refresh();
  startTimer();
})();
</script>
</body>
</html>
"##;
