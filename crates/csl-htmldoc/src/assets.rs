//! Static site assets embedded as constant strings.

/// Stylesheet shared by every generated page.
pub(crate) const SITE_CSS: &str = r#":root {
  --bg: #ffffff;
  --fg: #1f2430;
  --muted: #6b7280;
  --line: #e5e7eb;
  --accent: #2563eb;
  --chip-bg: #eef2ff;
  --code-bg: #f6f8fa;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  color: var(--fg);
  background: var(--bg);
  line-height: 1.5;
}

.site-header {
  border-bottom: 1px solid var(--line);
  padding: 16px 24px;
}

.site-header h1 { margin: 4px 0 0; font-size: 1.4rem; }

.crumbs { font-size: 0.85rem; color: var(--muted); }
.crumbs a { color: var(--accent); text-decoration: none; }

main { max-width: 960px; margin: 0 auto; padding: 16px 24px 48px; }

section h2 { font-size: 1.05rem; margin: 28px 0 8px; }

.schema-list { list-style: none; padding: 0; }
.schema-list li {
  display: flex;
  justify-content: space-between;
  border-bottom: 1px solid var(--line);
  padding: 10px 4px;
}
.schema-list a { color: var(--accent); text-decoration: none; font-weight: 600; }
.schema-list .meta { color: var(--muted); font-size: 0.85rem; }

.kpis { display: flex; gap: 16px; margin-top: 16px; }
.kpi {
  border: 1px solid var(--line);
  border-radius: 8px;
  padding: 10px 16px;
  min-width: 110px;
  display: flex;
  flex-direction: column;
}
.kpi-value { font-size: 1.3rem; font-weight: 700; }
.kpi-label { color: var(--muted); font-size: 0.75rem; }

.graph { width: 100%; min-height: 120px; }
.graph svg { display: block; }
.graph a text { fill: var(--accent); }
.graph line { stroke: var(--line); stroke-width: 1.5; }
.graph rect { fill: var(--code-bg); stroke: var(--line); rx: 6; }

.keys-table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
.keys-table th {
  text-align: left;
  color: var(--muted);
  font-weight: 600;
  border-bottom: 2px solid var(--line);
  padding: 6px 8px;
}
.keys-table td { border-bottom: 1px solid var(--line); padding: 6px 8px; vertical-align: top; }

code {
  background: var(--code-bg);
  border-radius: 4px;
  padding: 1px 5px;
  font-size: 0.85em;
}

.key-name { cursor: pointer; }
.key-name:hover { outline: 1px solid var(--accent); }

.badge {
  display: inline-block;
  margin-left: 6px;
  padding: 1px 7px;
  border-radius: 999px;
  font-size: 0.7rem;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.03em;
}
.badge-union { background: #ede9fe; color: #5b21b6; }
.badge-enum { background: #ecfdf5; color: #047857; }
.badge-any { background: #fef3c7; color: #92400e; }
.badge-required { background: #fee2e2; color: #b91c1c; }
.badge-optional { background: #e0f2fe; color: #0369a1; }
.badge-dynamic { background: #f3e8ff; color: #7e22ce; }

.chip {
  display: inline-block;
  background: var(--chip-bg);
  color: #3730a3;
  border-radius: 999px;
  padding: 1px 8px;
  margin: 1px 2px;
  font-size: 0.75rem;
}

.child-link { color: var(--accent); text-decoration: none; font-size: 0.85rem; }

.constraints ul { list-style: none; padding: 0; }
.constraints li { padding: 4px 0; }
.constraints a { color: var(--accent); text-decoration: none; }

.source pre {
  background: var(--code-bg);
  border: 1px solid var(--line);
  border-radius: 8px;
  padding: 12px;
  overflow-x: auto;
}
.source code { background: none; padding: 0; }
"#;

/// Client-side behavior: deterministic level-based layout for the
/// structure graph plus copy-to-clipboard for key paths.
pub(crate) const SITE_JS: &str = r#"(function () {
  "use strict";

  var NODE_W = 148;
  var NODE_H = 30;
  var LEVEL_GAP = 56;
  var NODE_GAP = 14;

  var measureCtx = null;
  function textWidth(text, font) {
    if (!measureCtx) {
      measureCtx = document.createElement("canvas").getContext("2d");
    }
    measureCtx.font = font;
    return measureCtx.measureText(text).width;
  }

  // Shorten a label with a trailing ellipsis until it fits the node box.
  function ellipsize(text, maxWidth, font) {
    if (textWidth(text, font) <= maxWidth) {
      return text;
    }
    var cut = text.length;
    while (cut > 1 && textWidth(text.slice(0, cut) + "…", font) > maxWidth) {
      cut -= 1;
    }
    return text.slice(0, cut) + "…";
  }

  function layoutGraph(container) {
    var payload;
    try {
      payload = JSON.parse(container.getAttribute("data-graph"));
    } catch (e) {
      return;
    }
    var nodes = payload.nodes || [];
    if (!nodes.length) {
      return;
    }

    // Group nodes per depth level, preserving payload order.
    var levels = [];
    nodes.forEach(function (node) {
      (levels[node.depth] = levels[node.depth] || []).push(node);
    });

    var width = Math.max(
      container.clientWidth || 640,
      Math.max.apply(null, levels.map(function (row) {
        return row.length * (NODE_W + NODE_GAP);
      }))
    );
    var height = levels.length * (NODE_H + LEVEL_GAP) - LEVEL_GAP + 8;

    // Deterministic positions: rows centered horizontally per level.
    var positions = {};
    levels.forEach(function (row, depth) {
      var rowWidth = row.length * NODE_W + (row.length - 1) * NODE_GAP;
      var x0 = (width - rowWidth) / 2;
      row.forEach(function (node, i) {
        positions[node.id] = {
          x: x0 + i * (NODE_W + NODE_GAP),
          y: depth * (NODE_H + LEVEL_GAP) + 4
        };
      });
    });

    var svgNS = "http://www.w3.org/2000/svg";
    var svg = document.createElementNS(svgNS, "svg");
    svg.setAttribute("width", width);
    svg.setAttribute("height", height);
    svg.setAttribute("viewBox", "0 0 " + width + " " + height);

    nodes.forEach(function (node) {
      if (!node.parent || !positions[node.parent]) {
        return;
      }
      var from = positions[node.parent];
      var to = positions[node.id];
      var line = document.createElementNS(svgNS, "line");
      line.setAttribute("x1", from.x + NODE_W / 2);
      line.setAttribute("y1", from.y + NODE_H);
      line.setAttribute("x2", to.x + NODE_W / 2);
      line.setAttribute("y2", to.y);
      svg.appendChild(line);
    });

    var font = "600 12px system-ui, sans-serif";
    nodes.forEach(function (node) {
      var pos = positions[node.id];
      var link = document.createElementNS(svgNS, "a");
      link.setAttribute("href", node.href);

      var rect = document.createElementNS(svgNS, "rect");
      rect.setAttribute("x", pos.x);
      rect.setAttribute("y", pos.y);
      rect.setAttribute("width", NODE_W);
      rect.setAttribute("height", NODE_H);
      link.appendChild(rect);

      var text = document.createElementNS(svgNS, "text");
      text.setAttribute("x", pos.x + NODE_W / 2);
      text.setAttribute("y", pos.y + NODE_H / 2 + 4);
      text.setAttribute("text-anchor", "middle");
      text.setAttribute("font-size", "12");
      text.setAttribute("font-weight", "600");
      text.textContent = ellipsize(node.label, NODE_W - 16, font);
      link.appendChild(text);

      svg.appendChild(link);
    });

    container.textContent = "";
    container.appendChild(svg);
  }

  function initCopyPaths() {
    document.querySelectorAll(".key-name[data-path]").forEach(function (el) {
      el.title = "Copy path";
      el.addEventListener("click", function () {
        var path = el.getAttribute("data-path");
        if (navigator.clipboard && navigator.clipboard.writeText) {
          navigator.clipboard.writeText(path);
        }
      });
    });
  }

  document.addEventListener("DOMContentLoaded", function () {
    document.querySelectorAll(".graph[data-graph]").forEach(layoutGraph);
    initCopyPaths();
  });
})();
"#;
