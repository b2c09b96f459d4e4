//! The single dashboard page. Charts are drawn client side from the
//! `ChartSpec` JSON returned by `/api/dashboard`.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Stock Price App</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { font-family: sans-serif; margin: 0; display: flex; }
  aside { width: 260px; padding: 1rem; background: #f0f2f6; min-height: 100vh; }
  aside label { display: block; margin-top: .8rem; }
  aside input, aside select { width: 100%; }
  main { flex: 1; padding: 1rem 2rem; }
  table { border-collapse: collapse; font-size: .9rem; }
  td, th { border: 1px solid #ddd; padding: .2rem .6rem; text-align: right; }
  .error { background: #fde2e1; color: #7d1a16; padding: .8rem; border-radius: 4px; }
  .chart { width: 100%; height: 480px; }
</style>
</head>
<body>
<aside>
  <h2>User Input Parameters</h2>
  <form id="inputs">
    <label>Ticker Symbol <input name="ticker" value="AAPL"></label>
    <label>Start Date <input name="start" type="date" value="2022-01-01"></label>
    <label>End Date <input name="end" type="date"></label>
    <label>Chart Type
      <select name="chart_type">
        <option>Line</option>
        <option>Candlestick</option>
        <option>OHLC</option>
      </select>
    </label>
  </form>
</aside>
<main>
  <h1>&#128200; Stock Price Web Application</h1>
  <p>This application allows you to visualize the stock price data for various companies.
  You can select a company ticker, date range, and choose the type of chart you'd like to see.</p>
  <p id="status"></p>
  <div id="output"></div>
</main>
<script>
const form = document.getElementById("inputs");
const statusLine = document.getElementById("status");
const output = document.getElementById("output");
const now = new Date();
form.end.value = [
  now.getFullYear(),
  String(now.getMonth() + 1).padStart(2, "0"),
  String(now.getDate()).padStart(2, "0"),
].join("-");

function escapeHtml(text) {
  const span = document.createElement("span");
  span.textContent = text;
  return span.innerHTML;
}

function fmt(value) {
  if (value === null || value === undefined) return "";
  return typeof value === "number" ? value.toFixed(2) : escapeHtml(value);
}

function table(rows, columns) {
  const head = "<tr>" + columns.map(c => "<th>" + c + "</th>").join("") + "</tr>";
  const body = rows.map(r => "<tr>" + columns.map(c => "<td>" + fmt(r[c]) + "</td>").join("") + "</tr>").join("");
  return "<table>" + head + body + "</table>";
}

function plot(target, spec) {
  const traces = spec.series.map(s => {
    const x = s.points.map(p => p.x);
    if (s.style === "ohlc") {
      return {
        type: spec.kind === "Candlestick" ? "candlestick" : "ohlc",
        name: s.name, x,
        open: s.points.map(p => p.open), high: s.points.map(p => p.high),
        low: s.points.map(p => p.low), close: s.points.map(p => p.close),
      };
    }
    return { type: "scatter", mode: "lines", name: s.name, x, y: s.points.map(p => p.y) };
  });
  Plotly.newPlot(target, traces, {
    title: spec.title,
    xaxis: { title: spec.x_axis_title },
    yaxis: { title: spec.y_axis_title },
  }, { responsive: true });
}

function section(html) {
  const div = document.createElement("div");
  div.innerHTML = html;
  output.appendChild(div);
  return div;
}

function errorBanner(message) {
  const p = document.createElement("p");
  p.className = "error";
  p.textContent = message;
  output.appendChild(p);
}

async function render() {
  output.innerHTML = "";
  statusLine.textContent = "Loading data...";
  const query = new URLSearchParams(new FormData(form));
  let response, body;
  try {
    response = await fetch("/api/dashboard?" + query);
    body = await response.json();
  } catch (e) {
    statusLine.textContent = "";
    errorBanner("Could not load data: " + e);
    return;
  }
  if (!response.ok) {
    statusLine.textContent = "";
    errorBanner(body.error);
    return;
  }
  statusLine.textContent = "Loading data...done!";

  section("<h3>Raw Data for " + escapeHtml(body.ticker) + "</h3>" +
    table(body.raw_tail, ["date", "open", "high", "low", "close", "volume"]));

  section("<h3>" + escapeHtml(body.ticker) + " Price Chart</h3>");
  if (body.primary_chart) {
    plot(section('<div class="chart"></div>').firstChild, body.primary_chart);
  } else {
    errorBanner(body.error);
  }

  section("<h3>Additional Metrics</h3>" +
    table(body.augmented_tail, ["date", "close", "ma20", "ma50"]));
  plot(section('<div class="chart"></div>').firstChild, body.moving_average_chart);
}

form.addEventListener("change", render);
form.addEventListener("submit", e => { e.preventDefault(); render(); });
render();
</script>
</body>
</html>
"#;
