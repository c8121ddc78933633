//! Sample project shared by unit tests: a Doxygen XML dump and its header.

use std::fs;
use std::path::{Path, PathBuf};

use refdoc_model::{Class, Index, Location, PropertyPass};
use refdoc_watch::{Extractor, LinkTable, ProjectWatcher, WatchError, WatchPaths, WatchSettings};
use tempfile::TempDir;

use crate::directive::Context;
use crate::listing::ListingReader;

pub(crate) const PCA_HPP: &str = "#pragma once

namespace oneapi::dal::pca {

/// Principal component analysis parameters.
template <typename Float = float>
class descriptor {
public:
    /// Creates a descriptor
    descriptor();

    /// Number of components
    std::int64_t get_component_count() const;

    bool get_deterministic() const;

    descriptor& set_component_count(std::int64_t value);

    descriptor& set_deterministic(bool value);
};

} // namespace oneapi::dal::pca
";

const INDEX_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.1">
  <compound refid="classoneapi_1_1dal_1_1pca_1_1descriptor" kind="class"><name>oneapi::dal::pca::descriptor</name></compound>
  <compound refid="namespaceoneapi_1_1dal_1_1pca" kind="namespace"><name>oneapi::dal::pca</name></compound>
  <compound refid="pca_8hpp" kind="file"><name>pca.hpp</name></compound>
</doxygenindex>
"#;

const CLASS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="classoneapi_1_1dal_1_1pca_1_1descriptor" kind="class" language="C++" prot="public">
    <compoundname>oneapi::dal::pca::descriptor</compoundname>
    <templateparamlist>
      <param>
        <type>typename Float</type>
        <defval>float</defval>
      </param>
    </templateparamlist>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="p_ctor" prot="public" static="no">
        <type></type>
        <argsstring>()</argsstring>
        <name>descriptor</name>
        <briefdescription>
<para>Creates a descriptor. </para>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="10" column="5"/>
      </memberdef>
      <memberdef kind="function" id="p_get_cc" prot="public" static="no">
        <type>std::int64_t</type>
        <argsstring>() const</argsstring>
        <name>get_component_count</name>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
<para>Number of components, $0$ keeps all. <simplesect kind="invariant"><para>component_count &gt;= 0 </para>
</simplesect>
<simplesect kind="remark"><para>default = 0 </para>
</simplesect>
</para>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="13" column="5"/>
      </memberdef>
      <memberdef kind="function" id="p_get_det" prot="public" static="no">
        <type>bool</type>
        <argsstring>() const</argsstring>
        <name>get_deterministic</name>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="15" column="5"/>
      </memberdef>
      <memberdef kind="function" id="p_set_cc" prot="public" static="no">
        <type>descriptor &amp;</type>
        <argsstring>(std::int64_t value)</argsstring>
        <name>set_component_count</name>
        <param>
          <type>std::int64_t</type>
          <declname>value</declname>
        </param>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="17" column="5"/>
      </memberdef>
      <memberdef kind="function" id="p_set_det" prot="public" static="no">
        <type>descriptor &amp;</type>
        <argsstring>(bool value)</argsstring>
        <name>set_deterministic</name>
        <param>
          <type>bool</type>
          <declname>value</declname>
        </param>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="19" column="5"/>
      </memberdef>
    </sectiondef>
    <briefdescription>
<para>Principal component analysis parameters. </para>
    </briefdescription>
    <detaileddescription>
<para><parameterlist kind="templateparam"><parameteritem>
<parameternamelist>
<parametername>Float</parametername>
</parameternamelist>
<parameterdescription>
<para>Floating-point type </para>
</parameterdescription>
</parameteritem>
</parameterlist>
</para>
    </detaileddescription>
    <location file="include/oneapi/dal/pca.hpp" line="7" column="1" bodyfile="include/oneapi/dal/pca.hpp" bodystart="7" bodyend="20"/>
  </compounddef>
</doxygen>
"#;

const NAMESPACE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.1">
  <compounddef id="namespaceoneapi_1_1dal_1_1pca" kind="namespace" language="C++">
    <compoundname>oneapi::dal::pca</compoundname>
    <innerclass refid="classoneapi_1_1dal_1_1pca_1_1descriptor" prot="public">oneapi::dal::pca::descriptor</innerclass>
    <sectiondef kind="func">
      <memberdef kind="function" id="pca_train" prot="public" static="no">
        <templateparamlist>
          <param>
            <type>typename Float</type>
          </param>
        </templateparamlist>
        <type>train_result</type>
        <argsstring>(const descriptor&lt;Float&gt; &amp;desc, const table &amp;data)</argsstring>
        <name>train</name>
        <param>
          <type>const descriptor&lt; Float &gt; &amp;</type>
          <declname>desc</declname>
        </param>
        <param>
          <type>const table &amp;</type>
          <declname>data</declname>
        </param>
        <briefdescription>
        </briefdescription>
        <detaileddescription>
<para>Trains the model. <parameterlist kind="templateparam"><parameteritem>
<parameternamelist>
<parametername>Float</parametername>
</parameternamelist>
<parameterdescription>
<para>Floating-point type </para>
</parameterdescription>
</parameteritem>
</parameterlist>
<parameterlist kind="param"><parameteritem>
<parameternamelist>
<parametername>data</parametername>
</parameternamelist>
<parameterdescription>
<para>Training data </para>
</parameterdescription>
</parameteritem>
</parameterlist>
<simplesect kind="pre"><para>data.has_data() </para>
</simplesect>
</para>
        </detaileddescription>
        <location file="include/oneapi/dal/pca.hpp" line="24" column="1"/>
      </memberdef>
    </sectiondef>
    <briefdescription>
    </briefdescription>
    <detaileddescription>
    </detaileddescription>
    <location file="include/oneapi/dal/pca.hpp" line="3" column="1"/>
  </compounddef>
</doxygen>
"#;

/// Class record pointing at the `descriptor` body in [`PCA_HPP`].
pub(crate) fn pca_class() -> Class {
    Class {
        name: "descriptor".to_owned(),
        namespace: "oneapi::dal::pca".to_owned(),
        fully_qualified_name: "oneapi::dal::pca::descriptor".to_owned(),
        parent_fully_qualified_name: "oneapi::dal::pca".to_owned(),
        location: Location {
            filename: "include/oneapi/dal/pca.hpp".to_owned(),
            bodystart: 7,
            bodyend: 20,
        },
        ..Class::default()
    }
}

/// Extractor that never has to run.
pub(crate) struct NoopExtractor;

impl Extractor for NoopExtractor {
    fn run(&self) -> Result<(), WatchError> {
        Ok(())
    }
}

/// Scratch project: `doxygen/xml`, `include`, `source` and `build/rst`.
pub(crate) struct Project {
    tmp: TempDir,
}

impl Project {
    pub(crate) fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let xml_dir = root.join("doxygen/xml");
        fs::create_dir_all(&xml_dir).unwrap();
        fs::write(xml_dir.join("index.xml"), INDEX_XML).unwrap();
        fs::write(
            xml_dir.join("classoneapi_1_1dal_1_1pca_1_1descriptor.xml"),
            CLASS_XML,
        )
        .unwrap();
        fs::write(xml_dir.join("namespaceoneapi_1_1dal_1_1pca.xml"), NAMESPACE_XML).unwrap();

        let header = root.join("include/oneapi/dal/pca.hpp");
        fs::create_dir_all(header.parent().unwrap()).unwrap();
        fs::write(header, PCA_HPP).unwrap();
        fs::create_dir_all(root.join("source")).unwrap();
        Self { tmp }
    }

    pub(crate) fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub(crate) fn source(&self, docname: &str) -> PathBuf {
        self.root().join(format!("source/{docname}.rst"))
    }

    pub(crate) fn output(&self, docname: &str) -> PathBuf {
        self.root().join(format!("build/rst/{docname}.rst"))
    }

    pub(crate) fn watch_paths(&self) -> WatchPaths {
        WatchPaths {
            source_dir: self.root().join("source"),
            xml_dir: self.root().join("doxygen/xml"),
            include_dir: self.root().join("include"),
            header_pattern: "*.hpp".to_owned(),
        }
    }

    pub(crate) fn context<'a>(&self, links: &'a mut LinkTable) -> Context<'a> {
        let index = Index::open(self.root().join("doxygen/xml"), vec![Box::new(PropertyPass)])
            .unwrap();
        let listing = ListingReader::new(self.root(), "///");
        let watcher = ProjectWatcher::new(
            links,
            self.watch_paths(),
            Box::new(NoopExtractor),
            WatchSettings::default(),
        );
        Context::new(index, listing, watcher)
    }
}
