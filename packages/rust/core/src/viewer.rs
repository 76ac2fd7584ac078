//! Static force-layout viewer for `graph.json`.
//!
//! The page loads D3 v7 from jsDelivr and fetches `graph.json` from its own
//! directory, so it only works when served over HTTP next to the JSON file.

/// File name of the graph data the viewer fetches.
pub const GRAPH_JSON_FILE: &str = "graph.json";

/// File name of the viewer page.
pub const GRAPH_HTML_FILE: &str = "graph.html";

/// D3 bundle loaded by the viewer.
pub const D3_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";

/// Render the viewer page.
pub fn graph_html() -> String {
    format!(
        r##"<!doctype html><meta charset="utf-8"><title>Graph</title>
<style> body{{font:14px/1.4 system-ui, sans-serif;margin:0}} #g{{width:100vw;height:100vh}} .n{{stroke:#999;stroke-width:.5}}
.c{{fill:#444}} a{{position:fixed;left:12px;top:10px}} </style>
<a href="index.html">← back</a>
<svg id="g"></svg>
<script src="{D3_CDN_URL}"></script>
<script>
fetch("{GRAPH_JSON_FILE}").then(r=>r.json()).then(({{nodes,links}})=>{{
  const svg=d3.select("#g"), W=innerWidth, H=innerHeight; svg.attr("width",W).attr("height",H);
  const sim=d3.forceSimulation(nodes).force("link", d3.forceLink(links).id(d=>d.id).distance(60))
              .force("charge", d3.forceManyBody().strength(-120)).force("center", d3.forceCenter(W/2,H/2));
  const link=svg.append("g").selectAll("line").data(links).enter().append("line").attr("class","n");
  const node=svg.append("g").selectAll("g").data(nodes).enter().append("g").call(d3.drag()
     .on("start",(e,d)=>{{if(!e.active)sim.alphaTarget(.3).restart();d.fx=d.x;d.fy=d.y;}})
     .on("drag",(e,d)=>{{d.fx=e.x;d.fy=e.y;}})
     .on("end",(e,d)=>{{if(!e.active)sim.alphaTarget(0);d.fx=null;d.fy=null;}}));
  node.append("circle").attr("r",4).attr("class","c");
  node.append("title").text(d=>d.id);
  sim.on("tick",()=>{{ link.attr("x1",d=>d.source.x).attr("y1",d=>d.source.y)
                     .attr("x2",d=>d.target.x).attr("y2",d=>d.target.y);
                     node.attr("transform",d=>`translate(${{d.x}},${{d.y}})`); }});
}});
</script>
"##
    )
}
