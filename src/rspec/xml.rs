//! GENI v3 request RSpec writer.

use super::types::{Link, LinkKind, Node, Request, Tour};
use crate::utils::xml_escape::{escape_attr, escape_text};

const GENI_NS: &str = "http://www.geni.net/resources/rspec/3";
const CLIENT_NS: &str = "http://www.protogeni.net/resources/rspec/ext/client/1";
const EMULAB_NS: &str = "http://www.protogeni.net/resources/rspec/ext/emulab/1";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://www.geni.net/resources/rspec/3 http://www.geni.net/resources/rspec/3/request.xsd";
const TOUR_NS: &str = "http://www.protogeni.net/resources/rspec/ext/apt-tour/1";

impl Request {
    /// Serialize the request as a GENI v3 request RSpec document
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<rspec xmlns=\"{}\" xmlns:client=\"{}\" xmlns:emulab=\"{}\" xmlns:xsi=\"{}\" xsi:schemaLocation=\"{}\" type=\"request\">\n",
            GENI_NS, CLIENT_NS, EMULAB_NS, XSI_NS, SCHEMA_LOCATION
        ));

        for node in &self.nodes {
            write_node(&mut xml, node);
        }
        for link in &self.links {
            write_link(&mut xml, link);
        }
        if let Some(tour) = &self.tour {
            write_tour(&mut xml, tour);
        }

        xml.push_str("</rspec>\n");
        xml
    }
}

fn write_node(xml: &mut String, node: &Node) {
    xml.push_str(&format!(
        "  <node client_id=\"{}\" exclusive=\"{}\">\n",
        escape_attr(&node.client_id),
        node.kind.exclusive()
    ));

    match &node.disk_image {
        Some(image) => {
            xml.push_str(&format!("    <sliver_type name=\"{}\">\n", node.kind.sliver_type()));
            xml.push_str(&format!("      <disk_image name=\"{}\"/>\n", escape_attr(image)));
            xml.push_str("    </sliver_type>\n");
        }
        None => {
            xml.push_str(&format!("    <sliver_type name=\"{}\"/>\n", node.kind.sliver_type()));
        }
    }

    if let Some(hardware_type) = &node.hardware_type {
        xml.push_str(&format!("    <hardware_type name=\"{}\"/>\n", escape_attr(hardware_type)));
    }

    if !node.services.is_empty() {
        xml.push_str("    <services>\n");
        for service in &node.services {
            xml.push_str(&format!(
                "      <execute shell=\"{}\" command=\"{}\"/>\n",
                escape_attr(&service.shell),
                escape_attr(&service.command)
            ));
        }
        xml.push_str("    </services>\n");
    }

    for iface in &node.interfaces {
        xml.push_str(&format!("    <interface client_id=\"{}\"/>\n", escape_attr(&iface.client_id)));
    }

    for bs in &node.blockstores {
        xml.push_str(&format!(
            "    <emulab:blockstore name=\"{}\" mountpoint=\"{}\" class=\"local\" size=\"{}\" placement=\"{}\"/>\n",
            escape_attr(&bs.name),
            escape_attr(&bs.mount),
            bs.size.as_str(),
            bs.placement.as_str()
        ));
    }

    xml.push_str("  </node>\n");
}

fn write_link(xml: &mut String, link: &Link) {
    xml.push_str(&format!("  <link client_id=\"{}\">\n", escape_attr(&link.client_id)));
    for iface in &link.interface_refs {
        xml.push_str(&format!("    <interface_ref client_id=\"{}\"/>\n", escape_attr(iface)));
    }
    if link.kind == LinkKind::Lan {
        xml.push_str("    <link_type name=\"lan\"/>\n");
    }
    if link.best_effort {
        xml.push_str("    <emulab:best_effort enabled=\"true\"/>\n");
    }
    xml.push_str("  </link>\n");
}

fn write_tour(xml: &mut String, tour: &Tour) {
    xml.push_str(&format!("  <rspec_tour xmlns=\"{}\">\n", TOUR_NS));
    xml.push_str(&format!(
        "    <description type=\"markdown\">{}</description>\n",
        escape_text(&tour.description)
    ));
    xml.push_str(&format!(
        "    <instructions type=\"markdown\">{}</instructions>\n",
        escape_text(&tour.instructions)
    ));
    xml.push_str("  </rspec_tour>\n");
}
