use crate::utils::error::{ImportError, Result};
use quick_xml::escape::escape;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Value { name: String, value: String },
    Element { name: String, children: Vec<Param> },
}

/// An XMLMC method call. Parameters are added in order; `open_element` /
/// `close_element` nest complex parameters such as `searchFilter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlmcRequest {
    service: String,
    method: String,
    params: Vec<Param>,
    open: Vec<(String, Vec<Param>)>,
}

impl XmlmcRequest {
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            params: Vec::new(),
            open: Vec::new(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let param = Param::Value {
            name: name.into(),
            value: value.into(),
        };
        match self.open.last_mut() {
            Some((_, children)) => children.push(param),
            None => self.params.push(param),
        }
        self
    }

    pub fn open_element(&mut self, name: impl Into<String>) -> &mut Self {
        self.open.push((name.into(), Vec::new()));
        self
    }

    pub fn close_element(&mut self, name: &str) -> Result<&mut Self> {
        let (open_name, children) = self.open.pop().ok_or_else(|| ImportError::XmlBuildError {
            message: format!("close_element({}) without matching open_element", name),
        })?;
        if open_name != name {
            return Err(ImportError::XmlBuildError {
                message: format!("close_element({}) does not match open element {}", name, open_name),
            });
        }

        let element = Param::Element {
            name: open_name,
            children,
        };
        match self.open.last_mut() {
            Some((_, parent)) => parent.push(element),
            None => self.params.push(element),
        }
        Ok(self)
    }

    /// Find a top-level or nested value parameter by name.
    pub fn param_value(&self, name: &str) -> Option<&str> {
        fn find<'a>(params: &'a [Param], name: &str) -> Option<&'a str> {
            params.iter().find_map(|param| match param {
                Param::Value { name: n, value } if n == name => Some(value.as_str()),
                Param::Element { children, .. } => find(children, name),
                _ => None,
            })
        }
        find(&self.params, name)
    }

    pub fn to_xml(&self) -> Result<String> {
        if let Some((name, _)) = self.open.last() {
            return Err(ImportError::XmlBuildError {
                message: format!("element {} was never closed", name),
            });
        }

        let mut xml = String::new();
        write_xml(&mut xml, self).map_err(|e| ImportError::XmlBuildError {
            message: e.to_string(),
        })?;
        Ok(xml)
    }
}

fn write_xml(xml: &mut String, request: &XmlmcRequest) -> std::fmt::Result {
    write!(
        xml,
        r#"<methodCall service="{}" method="{}"><params>"#,
        escape(request.service.as_str()),
        escape(request.method.as_str())
    )?;
    write_params(xml, &request.params)?;
    write!(xml, "</params></methodCall>")
}

fn write_params(xml: &mut String, params: &[Param]) -> std::fmt::Result {
    for param in params {
        match param {
            Param::Value { name, value } => {
                write!(xml, "<{0}>{1}</{0}>", name, escape(value.as_str()))?;
            }
            Param::Element { name, children } => {
                write!(xml, "<{}>", name)?;
                write_params(xml, children)?;
                write!(xml, "</{}>", name)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_element_rendering() {
        let mut request = XmlmcRequest::new("data", "entityBrowseRecords");
        request.set_param("entity", "Services");
        request.open_element("searchFilter");
        request.set_param("h_servicename", "Desk & Co <IT>");
        request.close_element("searchFilter").unwrap();
        request.set_param("maxResults", "1");

        let xml = request.to_xml().unwrap();
        assert_eq!(
            xml,
            "<methodCall service=\"data\" method=\"entityBrowseRecords\"><params>\
             <entity>Services</entity>\
             <searchFilter><h_servicename>Desk &amp; Co &lt;IT&gt;</h_servicename></searchFilter>\
             <maxResults>1</maxResults>\
             </params></methodCall>"
        );
        assert_eq!(request.param_value("h_servicename"), Some("Desk & Co <IT>"));
    }

    #[test]
    fn test_unbalanced_elements_are_rejected() {
        let mut request = XmlmcRequest::new("data", "entityBrowseRecords");
        assert!(request.close_element("searchFilter").is_err());

        request.open_element("searchFilter");
        assert!(request.to_xml().is_err());
        assert!(request.close_element("other").is_err());
    }
}
